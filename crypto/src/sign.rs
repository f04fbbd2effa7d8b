//! Ed25519 signing collaborator: `sign(bytes, key)` and `verify(bytes, sig, pubkey)`.

use bloom_types::{PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

/// Sign canonical bytes with the operator's private key.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against canonical bytes and a public key.
///
/// Returns `false` for malformed keys, bad signatures, and non-canonical
/// encodings (strict verification); never panics.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify_strict(message, &dalek_sig).is_ok()
}

//! Ed25519 key generation for the attestation operator.

use crate::CryptoError;
use bloom_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroize;

/// Generate a new operator key pair from the OS random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    PublicKey(SigningKey::from_bytes(&private.0).verifying_key().to_bytes())
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let private = PrivateKey(*seed);
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 64-digit hex seed, as supplied by an operator
/// environment variable. The intermediate buffer is zeroized.
pub fn keypair_from_hex_seed(seed_hex: &str) -> Result<KeyPair, CryptoError> {
    let mut bytes = hex::decode(seed_hex.trim())
        .map_err(|e| CryptoError::InvalidSeedHex(e.to_string()))?;
    let seed: Result<[u8; 32], _> = bytes.as_slice().try_into();
    let len = bytes.len();
    bytes.zeroize();
    let mut seed = seed.map_err(|_| CryptoError::InvalidSeedHex(format!("got {len} bytes")))?;
    let kp = keypair_from_seed(&seed);
    seed.zeroize();
    Ok(kp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_distinct_keys() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        assert_ne!(kp1.public, kp2.public);
    }

    #[test]
    fn public_from_private_matches_generated() {
        let kp = generate_keypair();
        assert_eq!(public_from_private(&kp.private), kp.public);
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let kp1 = keypair_from_seed(&[42u8; 32]);
        let kp2 = keypair_from_seed(&[42u8; 32]);
        assert_eq!(kp1.public, kp2.public);
        assert_ne!(keypair_from_seed(&[1u8; 32]).public, kp1.public);
    }

    #[test]
    fn hex_seed_matches_raw_seed() {
        let kp = keypair_from_hex_seed(&"2a".repeat(32)).unwrap();
        assert_eq!(kp.public, keypair_from_seed(&[0x2a; 32]).public);
    }

    #[test]
    fn hex_seed_rejects_wrong_length_and_digits() {
        assert!(matches!(
            keypair_from_hex_seed("abcd"),
            Err(CryptoError::InvalidSeedHex(_))
        ));
        assert!(keypair_from_hex_seed(&"zz".repeat(32)).is_err());
    }
}

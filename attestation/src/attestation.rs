//! Writing and verifying signed attestations.

use crate::envelope::AttestationEnvelope;
use crate::{AttestationError, AttestationSnapshot};
use bloom_crypto::{sign_message, verify_signature};
use bloom_types::{KeyPair, PublicKey, Signature, Timestamp};
use serde::{Deserialize, Serialize};

/// A snapshot bound to an Ed25519 signature and the signer's public key.
///
/// Immutable once produced. Deserialized attestations are untrusted until
/// [`verify_attestation`] says otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    snapshot: AttestationSnapshot,
    signature: Signature,
    #[serde(rename = "publicKey")]
    public_key: PublicKey,
}

impl Attestation {
    pub fn snapshot(&self) -> &AttestationSnapshot {
        &self.snapshot
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn timestamp(&self) -> Timestamp {
        self.snapshot.timestamp()
    }
}

/// Signs snapshots with the operator key.
pub struct AttestationWriter {
    keypair: KeyPair,
}

impl AttestationWriter {
    pub fn new(keypair: KeyPair) -> Self {
        Self { keypair }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    pub fn write_attestation(&self, snapshot: AttestationSnapshot) -> Attestation {
        let signature = sign_message(&snapshot.canonical_bytes(), &self.keypair.private);
        tracing::info!(
            timestamp = snapshot.timestamp().as_millis(),
            locked_sats = %snapshot.locked_sats().raw(),
            outstanding_bloom = %snapshot.outstanding_bloom().raw(),
            ratio = snapshot.collateralization_ratio(),
            "attestation written"
        );
        Attestation {
            snapshot,
            signature,
            public_key: self.keypair.public.clone(),
        }
    }

    /// Sign the compact exported artifact for the given snapshot.
    pub fn write_envelope(&self, signer: &str, snapshot: &AttestationSnapshot) -> AttestationEnvelope {
        AttestationEnvelope::sign(signer, snapshot, &self.keypair)
    }
}

/// Recompute the canonical bytes and check the embedded signature.
///
/// Fails closed: malformed snapshots and bad keys yield `false`.
pub fn verify_attestation(attestation: &Attestation) -> bool {
    if !attestation.snapshot.is_well_formed() {
        tracing::debug!(reason = "malformed ratio", "attestation rejected");
        return false;
    }
    let ok = verify_signed_bytes(
        &attestation.snapshot.canonical_bytes(),
        &attestation.signature,
        &attestation.public_key,
    );
    if !ok {
        tracing::debug!(
            timestamp = attestation.timestamp().as_millis(),
            reason = "signature",
            "attestation rejected"
        );
    }
    ok
}

/// Check a signature over bytes already in canonical form.
pub fn verify_signed_bytes(bytes: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    verify_signature(bytes, signature, public_key)
}

/// `(now - timestamp) > max_age_ms`. A timestamp ahead of `now` counts as age zero.
pub fn is_attestation_stale(attestation: &Attestation, max_age_ms: u64, now: Timestamp) -> bool {
    attestation.timestamp().elapsed_since(now) > max_age_ms
}

/// The newest attestation that verifies and is not stale, if any.
///
/// Only one attestation is ever authoritative; others are ignored, never merged.
pub fn most_recent_valid_attestation(
    attestations: &[Attestation],
    max_age_ms: u64,
    now: Timestamp,
) -> Option<&Attestation> {
    attestations
        .iter()
        .filter(|a| !is_attestation_stale(a, max_age_ms, now))
        .filter(|a| verify_attestation(a))
        .max_by_key(|a| a.timestamp())
}

/// Asserting form of verification plus staleness, for trusted call sites.
pub fn require_fresh_attestation(
    attestation: &Attestation,
    max_age_ms: u64,
    now: Timestamp,
) -> Result<(), AttestationError> {
    if !verify_attestation(attestation) {
        return Err(AttestationError::VerificationFailure);
    }
    if is_attestation_stale(attestation, max_age_ms, now) {
        return Err(AttestationError::Stale {
            age_ms: attestation.timestamp().elapsed_since(now),
            max_age_ms,
        });
    }
    Ok(())
}

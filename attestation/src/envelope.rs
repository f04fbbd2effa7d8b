//! The compact attestation artifact exported to dashboards and governance
//! tooling.
//!
//! ```json
//! {
//!   "payload": { "timestamp": 1700000000000, "sats_total": "100000000",
//!                "signer": "bloom-operator", "version": 1 },
//!   "signature": "<128 hex digits>",
//!   "publicKey": "<64 hex digits>",
//!   "alg": "ed25519"
//! }
//! ```
//!
//! Key and signature are kept as strings on the wire so that any JSON object
//! of the right shape parses; validity is decided by [`verify_envelope`].

use crate::decimal::parse_u128;
use crate::{AttestationError, AttestationSnapshot};
use bloom_crypto::{sign_message, verify_signature};
use bloom_types::{KeyPair, PublicKey, SatAmount, Signature, Timestamp};
use serde::{Deserialize, Serialize};

pub const ENVELOPE_VERSION: u32 = 1;
pub const ENVELOPE_ALG: &str = "ed25519";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopePayload {
    pub timestamp: u64,
    /// Locked reserve in satoshis, as a decimal string.
    pub sats_total: String,
    pub signer: String,
    pub version: u32,
}

impl EnvelopePayload {
    /// Signing bytes. The signer label is length-prefixed so it cannot
    /// smuggle in extra fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        format!(
            "bloom-envelope/v{}\ntimestamp={}\nsats_total={}\nsigner={}:{}\n",
            self.version,
            self.timestamp,
            self.sats_total,
            self.signer.len(),
            self.signer
        )
        .into_bytes()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationEnvelope {
    pub payload: EnvelopePayload,
    pub signature: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub alg: String,
}

impl AttestationEnvelope {
    pub(crate) fn sign(signer: &str, snapshot: &AttestationSnapshot, keypair: &KeyPair) -> Self {
        let payload = EnvelopePayload {
            timestamp: snapshot.timestamp().as_millis(),
            sats_total: snapshot.locked_sats().raw().to_string(),
            signer: signer.to_string(),
            version: ENVELOPE_VERSION,
        };
        let signature = sign_message(&payload.canonical_bytes(), &keypair.private);
        Self {
            payload,
            signature: signature.to_hex(),
            public_key: keypair.public.to_hex(),
            alg: ENVELOPE_ALG.to_string(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AttestationError> {
        serde_json::from_str(json).map_err(|e| AttestationError::Malformed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, AttestationError> {
        serde_json::to_string_pretty(self).map_err(|e| AttestationError::Malformed(e.to_string()))
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.payload.timestamp)
    }

    /// The attested reserve, if `sats_total` is a plain decimal integer.
    pub fn sats_total(&self) -> Option<SatAmount> {
        parse_u128(&self.payload.sats_total).map(SatAmount::new)
    }
}

/// Check algorithm, version, amount encoding and signature. Never panics.
pub fn verify_envelope(envelope: &AttestationEnvelope) -> bool {
    if envelope.alg != ENVELOPE_ALG || envelope.payload.version != ENVELOPE_VERSION {
        tracing::debug!(alg = %envelope.alg, version = envelope.payload.version, "envelope rejected");
        return false;
    }
    if envelope.sats_total().is_none() {
        tracing::debug!(reason = "sats_total", "envelope rejected");
        return false;
    }
    let (Some(public_key), Some(signature)) = (
        PublicKey::from_hex(&envelope.public_key),
        Signature::from_hex(&envelope.signature),
    ) else {
        tracing::debug!(reason = "encoding", "envelope rejected");
        return false;
    };
    verify_signature(&envelope.payload.canonical_bytes(), &signature, &public_key)
}

/// Same staleness rule as attestations: `(now - timestamp) > max_age_ms`.
pub fn is_envelope_stale(envelope: &AttestationEnvelope, max_age_ms: u64, now: Timestamp) -> bool {
    envelope.timestamp().elapsed_since(now) > max_age_ms
}

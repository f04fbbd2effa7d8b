//! Attestation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttestationError {
    #[error("attestation signature does not verify")]
    VerificationFailure,

    #[error("attestation is stale: {age_ms}ms old, limit {max_age_ms}ms")]
    Stale { age_ms: u64, max_age_ms: u64 },

    #[error("malformed attestation: {0}")]
    Malformed(String),
}

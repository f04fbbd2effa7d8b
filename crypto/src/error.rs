//! Crypto-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("seed must be 64 hex digits: {0}")]
    InvalidSeedHex(String),
}

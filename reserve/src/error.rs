//! Reserve-feed errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReserveError {
    #[error("reserve source unavailable: {0}")]
    Unavailable(String),

    #[error("reserve proof rejected: {0}")]
    InvalidProof(String),
}

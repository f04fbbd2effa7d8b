//! Peg-math errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PegError {
    #[error("arithmetic overflow converting {0} BLOOM to sats")]
    Overflow(u128),
}

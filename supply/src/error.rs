//! Supply-ledger errors.

use bloom_types::BloomAmount;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupplyError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient supply: burn of {requested} exceeds outstanding {available}")]
    InsufficientSupply {
        requested: BloomAmount,
        available: BloomAmount,
    },

    #[error("arithmetic overflow in supply accounting")]
    Overflow,

    #[error("supply ledger lock poisoned")]
    LockPoisoned,
}

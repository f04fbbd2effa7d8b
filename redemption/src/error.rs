//! Redemption errors.

use crate::intent::{RedemptionId, RedemptionStatus};
use bloom_supply::SupplyError;
use bloom_types::BloomAmount;
use thiserror::Error;

/// Failure reported by the settlement collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("settlement layer error: {0}")]
pub struct SettlementError(pub String);

#[derive(Debug, Error)]
pub enum RedemptionError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("BTC payout address must not be empty")]
    InvalidAddress,

    #[error("redemption of {requested} exceeds outstanding supply {supply}")]
    ExceedsSupply {
        requested: BloomAmount,
        supply: BloomAmount,
    },

    #[error("redemption {0} not found")]
    NotFound(RedemptionId),

    #[error("redemption {id} is not pending (status: {status:?})")]
    NotPending {
        id: RedemptionId,
        status: RedemptionStatus,
    },

    #[error("arithmetic overflow quoting redemption")]
    Overflow,

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error("supply error: {0}")]
    Supply(#[from] SupplyError),
}

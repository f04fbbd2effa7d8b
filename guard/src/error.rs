//! Mint-guard errors.

use bloom_peg::PegError;
use bloom_reserve::ReserveError;
use bloom_supply::SupplyError;
use bloom_types::SatAmount;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("collateral shortfall: mint needs {required} locked, have {locked}")]
    CollateralShortfall {
        required: SatAmount,
        locked: SatAmount,
    },

    #[error("arithmetic overflow in peg computation")]
    Overflow,

    #[error("supply error: {0}")]
    Supply(#[from] SupplyError),

    #[error("reserve error: {0}")]
    Reserve(#[from] ReserveError),
}

impl From<PegError> for GuardError {
    fn from(_: PegError) -> Self {
        GuardError::Overflow
    }
}

//! Peg math — the fixed BLOOM/BTC exchange rate.
//!
//! `10 BLOOM = 1 BTC`, so `1 BLOOM = 10_000_000 sats`.
//!
//! - BLOOM → sats is exact multiplication.
//! - sats → BLOOM floors, so a redeemer is never over-credited and mintable
//!   capacity is never over-estimated.
//!
//! Everything here is integer arithmetic. `CollateralRatio::as_f64` exists for
//! display only.

pub mod error;
pub mod info;
pub mod math;
pub mod ratio;

pub use error::PegError;
pub use info::PegInfo;
pub use math::{
    bloom_to_sats, max_redeemable_bloom, required_sats_for_supply, sats_to_bloom, BTC_PER_BLOOM,
    SATS_PER_BLOOM, SATS_PER_BTC,
};
pub use ratio::CollateralRatio;

//! Exact conversion between BLOOM and satoshis.

use crate::error::PegError;
use bloom_types::{BloomAmount, SatAmount};

/// Satoshis per bitcoin.
pub const SATS_PER_BTC: u128 = 100_000_000;

/// Denominator of the peg: one BTC backs this many BLOOM.
pub const BTC_PER_BLOOM: u128 = 10;

/// Satoshis backing a single BLOOM.
pub const SATS_PER_BLOOM: u128 = SATS_PER_BTC / BTC_PER_BLOOM;

const _: () = assert!(SATS_PER_BTC % BTC_PER_BLOOM == 0, "peg must divide evenly");

/// `bloom * SATS_PER_BLOOM`, exact. Fails only on `u128` overflow.
pub fn bloom_to_sats(bloom: BloomAmount) -> Result<SatAmount, PegError> {
    bloom
        .raw()
        .checked_mul(SATS_PER_BLOOM)
        .map(SatAmount::new)
        .ok_or(PegError::Overflow(bloom.raw()))
}

/// `floor(sats / SATS_PER_BLOOM)`. Never rounds up.
pub fn sats_to_bloom(sats: SatAmount) -> BloomAmount {
    BloomAmount::new(sats.raw() / SATS_PER_BLOOM)
}

/// Satoshis that must be locked to fully back `supply`.
pub fn required_sats_for_supply(supply: BloomAmount) -> Result<SatAmount, PegError> {
    bloom_to_sats(supply)
}

/// Upper bound on redeemable BLOOM derived from locked reserves alone,
/// independent of outstanding supply.
pub fn max_redeemable_bloom(locked_sats: SatAmount) -> BloomAmount {
    sats_to_bloom(locked_sats)
}

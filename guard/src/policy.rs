//! Pure peg-enforcement decisions. No I/O, no state.

use crate::error::GuardError;
use bloom_peg::CollateralRatio;
use bloom_types::{BloomAmount, SatAmount};

pub use bloom_peg::max_redeemable_bloom;

/// Satoshis that must be locked to back `supply` at the peg.
pub fn required_sats_for_supply(supply: BloomAmount) -> Result<SatAmount, GuardError> {
    Ok(bloom_peg::required_sats_for_supply(supply)?)
}

/// `locked_sats / required_sats_for_supply(supply)`; infinite at zero supply.
pub fn collateralization_ratio(
    locked_sats: SatAmount,
    supply: BloomAmount,
) -> Result<CollateralRatio, GuardError> {
    Ok(CollateralRatio::of(locked_sats, supply)?)
}

/// `locked_sats >= required_sats_for_supply(supply)`.
pub fn is_fully_reserved(locked_sats: SatAmount, supply: BloomAmount) -> Result<bool, GuardError> {
    Ok(locked_sats >= required_sats_for_supply(supply)?)
}

/// Whether minting `amount` on top of `supply` stays fully reserved.
///
/// Returns the sats the post-mint supply requires, or `CollateralShortfall`.
pub(crate) fn admit_mint(
    locked_sats: SatAmount,
    supply: BloomAmount,
    amount: BloomAmount,
) -> Result<SatAmount, GuardError> {
    let new_supply = supply.checked_add(amount).ok_or(GuardError::Overflow)?;
    let required = required_sats_for_supply(new_supply)?;
    if locked_sats < required {
        return Err(GuardError::CollateralShortfall {
            required,
            locked: locked_sats,
        });
    }
    Ok(required)
}

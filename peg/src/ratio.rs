//! Collateralization ratio: locked sats ÷ sats required for supply.

use crate::error::PegError;
use crate::math::required_sats_for_supply;
use bloom_types::{BloomAmount, SatAmount};
use std::fmt;

/// Fractional digits in the canonical decimal rendering.
pub const RATIO_DECIMALS: u32 = 8;

/// An exact collateralization ratio.
///
/// Kept as the rational `locked / required` so that every decision derived
/// from it stays in integers. `Infinite` when outstanding supply is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollateralRatio {
    Infinite,
    Finite {
        locked: SatAmount,
        required: SatAmount,
    },
}

impl CollateralRatio {
    /// Ratio of `locked_sats` to the sats required for `supply`.
    pub fn of(locked_sats: SatAmount, supply: BloomAmount) -> Result<Self, PegError> {
        if supply.is_zero() {
            return Ok(Self::Infinite);
        }
        Ok(Self::Finite {
            locked: locked_sats,
            required: required_sats_for_supply(supply)?,
        })
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// `locked >= required`, decided in integers.
    pub fn is_fully_reserved(&self) -> bool {
        match self {
            Self::Infinite => true,
            Self::Finite { locked, required } => locked >= required,
        }
    }

    /// Lossy float for display. Never feed this into a mint or redeem decision.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Infinite => f64::INFINITY,
            Self::Finite { locked, required } => locked.raw() as f64 / required.raw() as f64,
        }
    }

    /// Deterministic decimal rendering: `inf`, or the ratio truncated to
    /// `places` fractional digits by integer long division.
    pub fn to_decimal_string(&self, places: u32) -> String {
        let (locked, required) = match self {
            Self::Infinite => return "inf".to_string(),
            Self::Finite { locked, required } => (locked.raw(), required.raw()),
        };
        let mut out = (locked / required).to_string();
        if places == 0 {
            return out;
        }
        out.push('.');
        let mut rem = locked % required;
        for _ in 0..places {
            let (digit, next) = next_digit(rem, required);
            rem = next;
            out.push(char::from(b'0' + digit as u8));
        }
        out
    }
}

/// One long-division step: `(10 * rem) / required` and its remainder,
/// for `rem < required`, without forming `10 * rem`.
fn next_digit(rem: u128, required: u128) -> (u128, u128) {
    if let Some(scaled) = rem.checked_mul(10) {
        return (scaled / required, scaled % required);
    }
    // Add `rem` ten times modulo `required`; every partial sum stays below it.
    let gap = required - rem;
    let (mut digit, mut acc) = (0u128, 0u128);
    for _ in 0..10 {
        if acc >= gap {
            acc -= gap;
            digit += 1;
        } else {
            acc += rem;
        }
    }
    (digit, acc)
}

impl fmt::Display for CollateralRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(RATIO_DECIMALS))
    }
}

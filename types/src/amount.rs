//! Amount types for BLOOM and satoshis.
//!
//! Amounts are unsigned integers (u128) so that nothing gating a mint or a
//! redemption ever touches floating point. Arithmetic that can overflow is
//! exposed only through `checked_*` methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BLOOM amount — the pegged token, in whole token units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BloomAmount(u128);

impl BloomAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for BloomAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BLOOM", self.0)
    }
}

/// Satoshi amount — the reserve asset's smallest unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SatAmount(u128);

impl SatAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(sats: u128) -> Self {
        Self(sats)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for SatAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sats", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sub_refuses_to_go_negative() {
        let a = BloomAmount::new(3);
        assert_eq!(a.checked_sub(BloomAmount::new(4)), None);
        assert_eq!(a.checked_sub(BloomAmount::new(3)), Some(BloomAmount::ZERO));
    }

    #[test]
    fn checked_add_detects_overflow() {
        let max = SatAmount::new(u128::MAX);
        assert_eq!(max.checked_add(SatAmount::new(1)), None);
    }

    #[test]
    fn display_includes_unit() {
        assert_eq!(BloomAmount::new(7).to_string(), "7 BLOOM");
        assert_eq!(SatAmount::new(30_000_000).to_string(), "30000000 sats");
    }
}

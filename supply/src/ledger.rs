//! The supply ledger and its history records.

use crate::error::SupplyError;
use bloom_types::{BloomAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// One entry in the mint or burn history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub amount: BloomAmount,
    pub timestamp: Timestamp,
    /// Free-form operator note (e.g. "redemption 4").
    pub reason: String,
}

/// Outstanding BLOOM supply plus its append-only audit trail.
///
/// Failed operations leave the ledger untouched. Not deserializable: the
/// only way to build one is from empty through `record_mint`/`record_burn`.
///
/// ```compile_fail
/// fn restorable<T: serde::de::DeserializeOwned>() {}
/// restorable::<bloom_supply::SupplyLedger>();
/// ```
#[derive(Clone, Debug, Default)]
pub struct SupplyLedger {
    outstanding: BloomAmount,
    total_minted: BloomAmount,
    total_burned: BloomAmount,
    mint_history: Vec<SupplyRecord>,
    burn_history: Vec<SupplyRecord>,
}

impl SupplyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase supply by `amount` and append a mint record.
    ///
    /// Returns the new outstanding supply.
    pub fn record_mint(
        &mut self,
        amount: BloomAmount,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<BloomAmount, SupplyError> {
        if amount.is_zero() {
            return Err(SupplyError::InvalidAmount);
        }
        let outstanding = self
            .outstanding
            .checked_add(amount)
            .ok_or(SupplyError::Overflow)?;
        let total_minted = self
            .total_minted
            .checked_add(amount)
            .ok_or(SupplyError::Overflow)?;

        self.outstanding = outstanding;
        self.total_minted = total_minted;
        self.mint_history.push(SupplyRecord {
            amount,
            timestamp: now,
            reason: reason.into(),
        });
        tracing::debug!(amount = amount.raw(), outstanding = outstanding.raw(), "mint recorded");
        Ok(outstanding)
    }

    /// Decrease supply by `amount` and append a burn record.
    ///
    /// Returns the new outstanding supply.
    pub fn record_burn(
        &mut self,
        amount: BloomAmount,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<BloomAmount, SupplyError> {
        if amount.is_zero() {
            return Err(SupplyError::InvalidAmount);
        }
        let outstanding =
            self.outstanding
                .checked_sub(amount)
                .ok_or(SupplyError::InsufficientSupply {
                    requested: amount,
                    available: self.outstanding,
                })?;
        let total_burned = self
            .total_burned
            .checked_add(amount)
            .ok_or(SupplyError::Overflow)?;

        self.outstanding = outstanding;
        self.total_burned = total_burned;
        self.burn_history.push(SupplyRecord {
            amount,
            timestamp: now,
            reason: reason.into(),
        });
        tracing::debug!(amount = amount.raw(), outstanding = outstanding.raw(), "burn recorded");
        Ok(outstanding)
    }

    pub fn current_supply(&self) -> BloomAmount {
        self.outstanding
    }

    /// Cumulative BLOOM ever minted (never decreases).
    pub fn total_minted(&self) -> BloomAmount {
        self.total_minted
    }

    /// Cumulative BLOOM ever burned (never decreases).
    pub fn total_burned(&self) -> BloomAmount {
        self.total_burned
    }

    pub fn mint_history(&self) -> &[SupplyRecord] {
        &self.mint_history
    }

    pub fn burn_history(&self) -> &[SupplyRecord] {
        &self.burn_history
    }

    /// Audit check: recompute supply from the histories.
    pub fn invariant_holds(&self) -> bool {
        let sum = |records: &[SupplyRecord]| {
            records
                .iter()
                .try_fold(0u128, |acc, r| acc.checked_add(r.amount.raw()))
        };
        match (sum(&self.mint_history), sum(&self.burn_history)) {
            (Some(minted), Some(burned)) => {
                minted == self.total_minted.raw()
                    && burned == self.total_burned.raw()
                    && minted.checked_sub(burned) == Some(self.outstanding.raw())
            }
            _ => false,
        }
    }
}

//! The mint guard bound to a reserve feed and a shared supply ledger.

use crate::error::GuardError;
use crate::policy::{admit_mint, collateralization_ratio};
use bloom_peg::CollateralRatio;
use bloom_reserve::{ReserveFeed, ReserveSnapshot};
use bloom_supply::SharedLedger;
use bloom_types::{BloomAmount, SatAmount, Timestamp};
use serde::Serialize;

/// Outcome of an admitted mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MintReceipt {
    pub amount: BloomAmount,
    pub new_supply: BloomAmount,
    /// Reserve figure the admission was decided against.
    pub locked_sats: SatAmount,
    /// Sats required to back `new_supply`.
    pub required_sats: SatAmount,
}

/// Reserves and supply read at a single consistent moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PegSnapshot {
    pub reserve: ReserveSnapshot,
    pub outstanding: BloomAmount,
    pub ratio: CollateralRatio,
}

/// Decides, and optionally performs, reserve-backed mints.
///
/// `can_mint` and `assert_can_mint` only decide. `mint` decides and writes
/// while holding the ledger lock for the whole sequence; it is the only
/// mint path hosts should expose.
pub struct MintGuard<F> {
    feed: F,
    ledger: SharedLedger,
}

impl<F: ReserveFeed> MintGuard<F> {
    pub fn new(feed: F, ledger: SharedLedger) -> Self {
        Self { feed, ledger }
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Whether `amount` more BLOOM would still be fully reserved.
    pub fn can_mint(&self, amount: BloomAmount) -> Result<bool, GuardError> {
        match self.assert_can_mint(amount) {
            Ok(()) => Ok(true),
            Err(GuardError::CollateralShortfall { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Fails with `CollateralShortfall` when `can_mint` would be false.
    /// Never mutates the ledger.
    pub fn assert_can_mint(&self, amount: BloomAmount) -> Result<(), GuardError> {
        let ledger = self.ledger.lock()?;
        let locked = self.feed.locked_btc_sats()?;
        admit_mint(locked, ledger.current_supply(), amount)?;
        Ok(())
    }

    /// Check-and-mint as one critical section.
    ///
    /// The reserve read, supply read, admission check and `record_mint` all
    /// happen under the ledger lock. On any failure the ledger is unchanged.
    pub fn mint(
        &self,
        amount: BloomAmount,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<MintReceipt, GuardError> {
        let mut ledger = self.ledger.lock()?;
        let locked_sats = self.feed.locked_btc_sats()?;
        let supply = ledger.current_supply();

        let required_sats = match admit_mint(locked_sats, supply, amount) {
            Ok(required) => required,
            Err(e) => {
                tracing::warn!(
                    bloom_amount = amount.raw(),
                    supply = supply.raw(),
                    locked_sats = locked_sats.raw(),
                    "mint rejected: {e}"
                );
                return Err(e);
            }
        };
        let new_supply = ledger.record_mint(amount, reason, now)?;

        tracing::info!(
            bloom_amount = amount.raw(),
            required_sats = required_sats.raw(),
            locked_sats = locked_sats.raw(),
            new_supply = new_supply.raw(),
            "peg enforced: mint admitted"
        );
        Ok(MintReceipt {
            amount,
            new_supply,
            locked_sats,
            required_sats,
        })
    }

    /// Current collateralization, read under the ledger lock.
    pub fn collateralization(&self) -> Result<CollateralRatio, GuardError> {
        let ledger = self.ledger.lock()?;
        let locked = self.feed.locked_btc_sats()?;
        collateralization_ratio(locked, ledger.current_supply())
    }

    /// Reserve snapshot and outstanding supply taken inside the mint lock,
    /// so no mint or burn interleaves between the two reads.
    pub fn peg_snapshot(&self, now: Timestamp) -> Result<PegSnapshot, GuardError> {
        let ledger = self.ledger.lock()?;
        let reserve = self.feed.reserve_snapshot(now)?;
        let outstanding = ledger.current_supply();
        let ratio = collateralization_ratio(reserve.locked_sats, outstanding)?;
        Ok(PegSnapshot {
            reserve,
            outstanding,
            ratio,
        })
    }
}

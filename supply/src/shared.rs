//! A cloneable, mutex-guarded handle to one process-wide supply ledger.
//!
//! Hosts construct one `SharedLedger` and hand clones to the mint guard and
//! the redemption engine. Multi-step sequences (check-then-mint) must hold
//! the guard from [`SharedLedger::lock`] for their whole duration.
//!
//! Everyone else gets a [`LedgerView`]: same ledger, no way to write.

use crate::error::SupplyError;
use crate::ledger::{SupplyLedger, SupplyRecord};
use bloom_types::{BloomAmount, Timestamp};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<SupplyLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: SupplyLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Acquire exclusive access for a multi-step critical section.
    pub fn lock(&self) -> Result<MutexGuard<'_, SupplyLedger>, SupplyError> {
        self.inner.lock().map_err(|_| SupplyError::LockPoisoned)
    }

    pub fn current_supply(&self) -> Result<BloomAmount, SupplyError> {
        Ok(self.lock()?.current_supply())
    }

    pub fn record_burn(
        &self,
        amount: BloomAmount,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<BloomAmount, SupplyError> {
        self.lock()?.record_burn(amount, reason, now)
    }

    /// Copy of the mint history, detached from the lock.
    pub fn mint_history(&self) -> Result<Vec<SupplyRecord>, SupplyError> {
        Ok(self.lock()?.mint_history().to_vec())
    }

    /// Copy of the burn history, detached from the lock.
    pub fn burn_history(&self) -> Result<Vec<SupplyRecord>, SupplyError> {
        Ok(self.lock()?.burn_history().to_vec())
    }

    /// A read-only handle onto the same ledger.
    pub fn view(&self) -> LedgerView {
        LedgerView {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Read-only access to a shared ledger.
///
/// Cannot mint or burn; hand this to reporting and audit code.
///
/// ```compile_fail
/// use bloom_supply::SharedLedger;
/// use bloom_types::{BloomAmount, Timestamp};
///
/// let view = SharedLedger::default().view();
/// view.lock().unwrap().record_mint(BloomAmount::new(1), "x", Timestamp::EPOCH);
/// ```
#[derive(Clone, Debug)]
pub struct LedgerView {
    inner: Arc<Mutex<SupplyLedger>>,
}

impl LedgerView {
    fn read(&self) -> Result<MutexGuard<'_, SupplyLedger>, SupplyError> {
        self.inner.lock().map_err(|_| SupplyError::LockPoisoned)
    }

    pub fn current_supply(&self) -> Result<BloomAmount, SupplyError> {
        Ok(self.read()?.current_supply())
    }

    pub fn total_minted(&self) -> Result<BloomAmount, SupplyError> {
        Ok(self.read()?.total_minted())
    }

    pub fn total_burned(&self) -> Result<BloomAmount, SupplyError> {
        Ok(self.read()?.total_burned())
    }

    pub fn mint_history(&self) -> Result<Vec<SupplyRecord>, SupplyError> {
        Ok(self.read()?.mint_history().to_vec())
    }

    pub fn burn_history(&self) -> Result<Vec<SupplyRecord>, SupplyError> {
        Ok(self.read()?.burn_history().to_vec())
    }

    pub fn invariant_holds(&self) -> Result<bool, SupplyError> {
        Ok(self.read()?.invariant_holds())
    }
}

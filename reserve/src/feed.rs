//! The reserve-feed interface and its constant implementation.

use crate::error::ReserveError;
use crate::snapshot::{ReserveSnapshot, SpvProof};
use bloom_types::{SatAmount, Timestamp};
use std::sync::{Arc, RwLock};

/// A source of the currently locked reserve, in satoshis.
///
/// Implementations may block on external I/O and may fail. Retry policy, if
/// any, belongs to the implementation; consumers call once.
pub trait ReserveFeed {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError>;

    /// Snapshot of the reserve at `now`. Feeds without proof metadata return
    /// an unproven snapshot.
    fn reserve_snapshot(&self, now: Timestamp) -> Result<ReserveSnapshot, ReserveError> {
        Ok(ReserveSnapshot::unproven(self.locked_btc_sats()?, now))
    }
}

impl<F: ReserveFeed + ?Sized> ReserveFeed for Arc<F> {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError> {
        (**self).locked_btc_sats()
    }

    fn reserve_snapshot(&self, now: Timestamp) -> Result<ReserveSnapshot, ReserveError> {
        (**self).reserve_snapshot(now)
    }
}

impl<F: ReserveFeed + ?Sized> ReserveFeed for Box<F> {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError> {
        (**self).locked_btc_sats()
    }

    fn reserve_snapshot(&self, now: Timestamp) -> Result<ReserveSnapshot, ReserveError> {
        (**self).reserve_snapshot(now)
    }
}

/// Chain verification collaborator (interface only).
///
/// `Ok(None)` means "no proof available right now", which is not an error.
pub trait SpvProofSource {
    fn verify_spv_proof(&self) -> Result<Option<SpvProof>, ReserveError>;
}

impl<S: SpvProofSource + ?Sized> SpvProofSource for Arc<S> {
    fn verify_spv_proof(&self) -> Result<Option<SpvProof>, ReserveError> {
        (**self).verify_spv_proof()
    }
}

impl<S: SpvProofSource + ?Sized> SpvProofSource for Box<S> {
    fn verify_spv_proof(&self) -> Result<Option<SpvProof>, ReserveError> {
        (**self).verify_spv_proof()
    }
}

/// A reserve feed returning a configured constant.
///
/// The value is mutable through [`StaticReserveFeed::set_locked_sats`] for
/// bootstrap and test use only.
#[derive(Debug, Default)]
pub struct StaticReserveFeed {
    locked: RwLock<SatAmount>,
}

impl StaticReserveFeed {
    pub fn new(locked_sats: SatAmount) -> Self {
        Self {
            locked: RwLock::new(locked_sats),
        }
    }

    pub fn set_locked_sats(&self, locked_sats: SatAmount) {
        let mut guard = self.locked.write().unwrap_or_else(|e| e.into_inner());
        *guard = locked_sats;
    }
}

impl ReserveFeed for StaticReserveFeed {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError> {
        Ok(*self.locked.read().unwrap_or_else(|e| e.into_inner()))
    }
}

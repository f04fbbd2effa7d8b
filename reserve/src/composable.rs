//! Two-tier reserve feed: SPV primary, one-shot fallback.
//!
//! The primary is asked once per call. If it fails or has no proof, the
//! fallback is asked exactly once. The primary is never retried inside a
//! call, so worst-case latency is one primary attempt plus one fallback read.
//! Running on the fallback is a normal operating mode, logged at `warn`
//! (failure) or `debug` (absent proof), not an error.

use crate::error::ReserveError;
use crate::feed::{ReserveFeed, SpvProofSource};
use crate::snapshot::{ReserveSnapshot, SpvProof};
use bloom_types::{SatAmount, Timestamp};

pub struct ComposableReserveFeed<P, F> {
    primary: P,
    fallback: F,
}

impl<P: SpvProofSource, F: ReserveFeed> ComposableReserveFeed<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Single primary attempt; `None` means "use the fallback".
    fn try_primary(&self) -> Option<SpvProof> {
        match self.primary.verify_spv_proof() {
            Ok(Some(proof)) => Some(proof),
            Ok(None) => {
                tracing::debug!("no SPV proof available, reading fallback reserve feed");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "SPV verification failed, reading fallback reserve feed");
                None
            }
        }
    }
}

impl<P: SpvProofSource, F: ReserveFeed> ReserveFeed for ComposableReserveFeed<P, F> {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError> {
        match self.try_primary() {
            Some(proof) => Ok(proof.locked_sats),
            None => self.fallback.locked_btc_sats(),
        }
    }

    fn reserve_snapshot(&self, now: Timestamp) -> Result<ReserveSnapshot, ReserveError> {
        match self.try_primary() {
            Some(proof) => Ok(ReserveSnapshot::from_proof(proof, now)),
            None => Ok(ReserveSnapshot::unproven(
                self.fallback.locked_btc_sats()?,
                now,
            )),
        }
    }
}

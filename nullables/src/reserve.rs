//! Nullable reserve sources — scripted SPV results and a controllable feed.

use bloom_reserve::{ReserveError, ReserveFeed, SpvProof, SpvProofSource};
use bloom_types::SatAmount;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

/// What the next SPV verification returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpvMode {
    Present(SpvProof),
    Absent,
    Failing(String),
}

/// A scripted SPV verifier that counts calls.
pub struct NullSpvSource {
    mode: Mutex<SpvMode>,
    calls: AtomicU32,
}

impl NullSpvSource {
    pub fn new(mode: SpvMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            calls: AtomicU32::new(0),
        }
    }

    pub fn set_mode(&self, mode: SpvMode) {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner()) = mode;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SpvProofSource for NullSpvSource {
    fn verify_spv_proof(&self) -> Result<Option<SpvProof>, ReserveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.mode.lock().unwrap_or_else(|e| e.into_inner()) {
            SpvMode::Present(proof) => Ok(Some(proof.clone())),
            SpvMode::Absent => Ok(None),
            SpvMode::Failing(reason) => Err(ReserveError::Unavailable(reason.clone())),
        }
    }
}

/// A reserve feed whose value and availability are set by the test.
pub struct NullReserveFeed {
    locked: Mutex<SatAmount>,
    down: AtomicBool,
    reads: AtomicU32,
}

impl NullReserveFeed {
    pub fn new(locked_sats: SatAmount) -> Self {
        Self {
            locked: Mutex::new(locked_sats),
            down: AtomicBool::new(false),
            reads: AtomicU32::new(0),
        }
    }

    pub fn set_locked_sats(&self, locked_sats: SatAmount) {
        *self.locked.lock().unwrap_or_else(|e| e.into_inner()) = locked_sats;
    }

    /// While down, every read fails with `Unavailable`.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ReserveFeed for NullReserveFeed {
    fn locked_btc_sats(&self) -> Result<SatAmount, ReserveError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(ReserveError::Unavailable("null feed is down".into()));
        }
        Ok(*self.locked.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

//! Nullable clock — deterministic time for testing.

use bloom_types::Timestamp;
use std::cell::Cell;

/// A deterministic millisecond clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_millis: u64) -> Self {
        Self {
            current: Cell::new(initial_millis),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.current.get())
    }

    /// Advance time by a number of milliseconds.
    pub fn advance(&self, millis: u64) {
        self.current.set(self.current.get().saturating_add(millis));
    }

    /// Set the time to a specific value.
    pub fn set(&self, millis: u64) {
        self.current.set(millis);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1_700_000_000_000)
    }
}

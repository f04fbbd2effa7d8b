//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the peg core (wall clock, settlement layer,
//! SPV verifier, reserve feed) has a stand-in here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Never touches the network or the Bitcoin chain
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod reserve;
pub mod settlement;

pub use clock::NullClock;
pub use reserve::{NullReserveFeed, NullSpvSource, SpvMode};
pub use settlement::NullSettlement;

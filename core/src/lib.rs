//! BLOOM peg core — explicit wiring of every peg component.
//!
//! [`PegCore`] owns one supply ledger shared by:
//! - the mint guard (reserve-gated, atomic check-and-mint)
//! - the redemption engine (quote, settle, burn on completion)
//! - the attestation writer (signed reserve/supply snapshots)
//!
//! Nothing here is a process-wide singleton; hosts construct a `PegCore`
//! from a [`CoreConfig`] and the collaborators they choose.

pub mod config;
pub mod error;
pub mod logging;
pub mod peg_core;

pub use config::CoreConfig;
pub use error::CoreError;
pub use logging::{init_logging, LogFormat};
pub use peg_core::{PegCore, SharedReserveFeed, SharedSettlement};

//! Reserve feeds — "how many satoshis are currently locked".
//!
//! - [`ReserveFeed`]: the interface every consumer depends on.
//! - [`StaticReserveFeed`]: a configured constant (bootstrap, manual attestation, tests).
//! - [`SpvProofSource`]: interface-only collaborator performing chain verification.
//! - [`ComposableReserveFeed`]: SPV primary with a one-shot fallback feed.

pub mod composable;
pub mod error;
pub mod feed;
pub mod snapshot;

pub use composable::ComposableReserveFeed;
pub use error::ReserveError;
pub use feed::{ReserveFeed, SpvProofSource, StaticReserveFeed};
pub use snapshot::{ReserveSnapshot, ReserveSource, SpvProof};

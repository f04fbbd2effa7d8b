//! Mint guard — peg enforcement on top of the supply ledger.
//!
//! [`policy`] holds the pure decisions (required sats, ratio, full reservation).
//! [`MintGuard`] binds a reserve feed to a shared supply ledger and runs the
//! reserve read, the supply read, the admission check and the supply write
//! under one ledger lock, so concurrent mints cannot both pass against the
//! same stale supply figure.

pub mod error;
pub mod guard;
pub mod policy;

pub use error::GuardError;
pub use guard::{MintGuard, MintReceipt, PegSnapshot};
pub use policy::{
    collateralization_ratio, is_fully_reserved, max_redeemable_bloom, required_sats_for_supply,
};

//! Supply ledger — the accounting primitive for outstanding BLOOM.
//!
//! Supply changes only through `record_mint` and `record_burn`, each of which
//! appends an immutable record to its history. The ledger knows nothing about
//! reserves; peg enforcement is layered on top by the mint guard.
//!
//! Invariant: `outstanding == Σ mints − Σ burns`, and never negative.

pub mod error;
pub mod ledger;
pub mod shared;

pub use error::SupplyError;
pub use ledger::{SupplyLedger, SupplyRecord};
pub use shared::{LedgerView, SharedLedger};

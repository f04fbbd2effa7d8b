//! Redemption engine — BLOOM back to BTC at the peg.
//!
//! A redemption request is validated against outstanding supply, quoted at
//! exactly `bloom × 10_000_000` sats, and handed to the settlement layer as a
//! time-locked payout. The intent stays `Pending` until a settlement watcher
//! calls [`RedemptionEngine::complete_redemption`], which burns the BLOOM.
//! Completion is idempotent: a second call for the same id is rejected with
//! `NotPending` and has no side effects.

pub mod engine;
pub mod error;
pub mod intent;
pub mod settlement;

pub use engine::RedemptionEngine;
pub use error::{RedemptionError, SettlementError};
pub use intent::{RedemptionId, RedemptionIntent, RedemptionStatus};
pub use settlement::{HtlcRecord, SettlementLayer, SettlementTxId};

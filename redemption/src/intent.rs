//! Redemption intents and their two-state lifecycle.

use crate::settlement::SettlementTxId;
use bloom_types::{BloomAmount, SatAmount, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential redemption identifier, unique per engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RedemptionId(pub u64);

impl fmt::Display for RedemptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redemption-{}", self.0)
    }
}

/// `Pending → Completed`; `Completed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedemptionStatus {
    Pending,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionIntent {
    pub id: RedemptionId,
    pub bloom_amount: BloomAmount,
    pub btc_address: String,
    /// Fixed at creation as `bloom_amount × SATS_PER_BLOOM`; never recomputed.
    pub quoted_sats: SatAmount,
    pub status: RedemptionStatus,
    pub settlement_tx_id: SettlementTxId,
    pub created_at: Timestamp,
    /// Expiry handed to the settlement layer's time-locked payout.
    pub expires_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl RedemptionIntent {
    pub fn is_pending(&self) -> bool {
        self.status == RedemptionStatus::Pending
    }

    /// Pending past its payout expiry. Nothing transitions automatically;
    /// operators decide what to do with these.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.is_pending() && now >= self.expires_at
    }
}

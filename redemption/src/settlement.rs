//! The settlement collaborator contract.
//!
//! A production settlement layer builds real time-locked Bitcoin contracts
//! and watches the chain. The redemption engine depends only on the three
//! operations below.

use crate::error::SettlementError;
use bloom_types::{SatAmount, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a payout created by the settlement layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementTxId(pub String);

impl fmt::Display for SettlementTxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A payout as tracked by the settlement layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcRecord {
    pub tx_id: SettlementTxId,
    pub btc_address: String,
    pub sats: SatAmount,
    pub expiry: Timestamp,
    pub completed: bool,
}

pub trait SettlementLayer {
    /// Create a time-locked payout of `sats` to `btc_address`.
    fn create_htlc(
        &mut self,
        btc_address: &str,
        sats: SatAmount,
        expiry: Timestamp,
    ) -> Result<SettlementTxId, SettlementError>;

    /// Mark a payout complete. `false` if unknown or already completed.
    fn complete_htlc(&mut self, tx_id: &SettlementTxId) -> bool;

    /// Payouts not yet completed.
    fn pending_htlcs(&self) -> Vec<HtlcRecord>;
}

impl<S: SettlementLayer + ?Sized> SettlementLayer for Box<S> {
    fn create_htlc(
        &mut self,
        btc_address: &str,
        sats: SatAmount,
        expiry: Timestamp,
    ) -> Result<SettlementTxId, SettlementError> {
        (**self).create_htlc(btc_address, sats, expiry)
    }

    fn complete_htlc(&mut self, tx_id: &SettlementTxId) -> bool {
        (**self).complete_htlc(tx_id)
    }

    fn pending_htlcs(&self) -> Vec<HtlcRecord> {
        (**self).pending_htlcs()
    }
}

//! Static description of the peg, for dashboards and operator tooling.

use crate::math::{BTC_PER_BLOOM, SATS_PER_BLOOM};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegInfo {
    /// BLOOM units backed by one BTC.
    pub bloom_per_btc: u128,
    pub sats_per_bloom: u128,
    pub peg_statement: String,
}

impl PegInfo {
    pub fn current() -> Self {
        Self {
            bloom_per_btc: BTC_PER_BLOOM,
            sats_per_bloom: SATS_PER_BLOOM,
            peg_statement: format!("Peg: {} BLOOM = 1 BTC", BTC_PER_BLOOM),
        }
    }
}

//! The attested snapshot and its canonical signing bytes.

use crate::decimal;
use bloom_peg::{CollateralRatio, PegError};
use bloom_reserve::ReserveSnapshot;
use bloom_types::{BloomAmount, ProofHash, SatAmount, Timestamp};
use serde::{Deserialize, Serialize};

const DOMAIN_TAG: &str = "bloom-attestation/v1";

/// Reserve and supply at a point in time.
///
/// Carries the raw inputs (`locked_sats`, `outstanding_bloom`) alongside the
/// signer's ratio so a third party can recompute collateralization without
/// trusting the signer's arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationSnapshot {
    timestamp: Timestamp,
    #[serde(with = "decimal::sats")]
    locked_sats: SatAmount,
    #[serde(with = "decimal::bloom")]
    outstanding_bloom: BloomAmount,
    collateralization_ratio: String,
    header_hash: ProofHash,
    merkle_root: ProofHash,
    utxo_count: u32,
}

impl AttestationSnapshot {
    pub fn new(
        timestamp: Timestamp,
        locked_sats: SatAmount,
        outstanding_bloom: BloomAmount,
        header_hash: ProofHash,
        merkle_root: ProofHash,
        utxo_count: u32,
    ) -> Result<Self, PegError> {
        let ratio = CollateralRatio::of(locked_sats, outstanding_bloom)?;
        Ok(Self {
            timestamp,
            locked_sats,
            outstanding_bloom,
            collateralization_ratio: ratio.to_string(),
            header_hash,
            merkle_root,
            utxo_count,
        })
    }

    /// Combine a reserve snapshot with the supply read at the same moment.
    pub fn from_reserve(
        reserve: &ReserveSnapshot,
        outstanding_bloom: BloomAmount,
    ) -> Result<Self, PegError> {
        Self::new(
            reserve.timestamp,
            reserve.locked_sats,
            outstanding_bloom,
            reserve.header_hash,
            reserve.merkle_root,
            reserve.utxo_count,
        )
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn locked_sats(&self) -> SatAmount {
        self.locked_sats
    }

    pub fn outstanding_bloom(&self) -> BloomAmount {
        self.outstanding_bloom
    }

    /// The signer's ratio, as the canonical decimal string.
    pub fn collateralization_ratio(&self) -> &str {
        &self.collateralization_ratio
    }

    pub fn header_hash(&self) -> ProofHash {
        self.header_hash
    }

    pub fn merkle_root(&self) -> ProofHash {
        self.merkle_root
    }

    pub fn utxo_count(&self) -> u32 {
        self.utxo_count
    }

    /// Recompute the ratio from the attested inputs and compare.
    pub fn ratio_matches_reserves(&self) -> bool {
        CollateralRatio::of(self.locked_sats, self.outstanding_bloom)
            .map(|r| r.to_string() == self.collateralization_ratio)
            .unwrap_or(false)
    }

    /// Whether the free-text field is a plain ratio rendering. Guards the
    /// line-oriented canonical encoding against embedded separators.
    pub(crate) fn is_well_formed(&self) -> bool {
        let r = self.collateralization_ratio.as_str();
        r == "inf" || (!r.is_empty() && r.bytes().all(|b| b.is_ascii_digit() || b == b'.'))
    }

    /// Deterministic signing bytes: domain tag, then one `key=value` line per
    /// field in fixed order, integers in decimal, hashes in lowercase hex.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        format!(
            "{DOMAIN_TAG}\n\
             timestamp={}\n\
             locked_sats={}\n\
             outstanding_bloom={}\n\
             collateralization_ratio={}\n\
             header_hash={}\n\
             merkle_root={}\n\
             utxo_count={}\n",
            self.timestamp.as_millis(),
            self.locked_sats.raw(),
            self.outstanding_bloom.raw(),
            self.collateralization_ratio,
            self.header_hash.to_hex(),
            self.merkle_root.to_hex(),
            self.utxo_count,
        )
        .into_bytes()
    }
}

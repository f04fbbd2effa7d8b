//! Point-in-time descriptions of locked reserves.

use bloom_types::{ProofHash, SatAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// Result of a successful SPV verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpvProof {
    pub locked_sats: SatAmount,
    pub header_hash: ProofHash,
    pub merkle_root: ProofHash,
    pub utxo_count: u32,
}

/// Where a reserve figure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveSource {
    /// Chain-verified by the SPV primary.
    Spv,
    /// Supplied by a fallback feed (manual attestation, static bootstrap value).
    Fallback,
}

/// Locked reserves at a moment, with enough proof metadata for a third party
/// to cross-check. Fallback snapshots carry zero hashes and zero UTXOs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub locked_sats: SatAmount,
    pub timestamp: Timestamp,
    pub header_hash: ProofHash,
    pub merkle_root: ProofHash,
    pub utxo_count: u32,
    pub source: ReserveSource,
}

impl ReserveSnapshot {
    /// A snapshot with no chain proof behind it.
    pub fn unproven(locked_sats: SatAmount, timestamp: Timestamp) -> Self {
        Self {
            locked_sats,
            timestamp,
            header_hash: ProofHash::ZERO,
            merkle_root: ProofHash::ZERO,
            utxo_count: 0,
            source: ReserveSource::Fallback,
        }
    }

    pub fn from_proof(proof: SpvProof, timestamp: Timestamp) -> Self {
        Self {
            locked_sats: proof.locked_sats,
            timestamp,
            header_hash: proof.header_hash,
            merkle_root: proof.merkle_root,
            utxo_count: proof.utxo_count,
            source: ReserveSource::Spv,
        }
    }
}

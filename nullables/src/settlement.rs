//! Nullable settlement layer — record payouts without touching Bitcoin.

use bloom_crypto::blake2b_256_multi;
use bloom_redemption::{HtlcRecord, SettlementError, SettlementLayer, SettlementTxId};
use bloom_types::{SatAmount, Timestamp};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    htlcs: Vec<HtlcRecord>,
    refuse: Option<String>,
    completions: u32,
}

/// An in-memory settlement layer.
///
/// Clones share state, so a test can keep a handle for assertions after
/// moving one into the engine. Transaction ids are Blake2b digests of the
/// payout parameters plus a sequence number, hex encoded.
#[derive(Clone, Default)]
pub struct NullSettlement {
    state: Arc<Mutex<State>>,
}

impl NullSettlement {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent `create_htlc` fail with `reason`.
    pub fn refuse_with(&self, reason: impl Into<String>) {
        self.state().refuse = Some(reason.into());
    }

    pub fn accept(&self) {
        self.state().refuse = None;
    }

    /// Every payout ever created, completed or not.
    pub fn all_htlcs(&self) -> Vec<HtlcRecord> {
        self.state().htlcs.clone()
    }

    /// Number of successful `complete_htlc` calls.
    pub fn completions(&self) -> u32 {
        self.state().completions
    }
}

impl SettlementLayer for NullSettlement {
    fn create_htlc(
        &mut self,
        btc_address: &str,
        sats: SatAmount,
        expiry: Timestamp,
    ) -> Result<SettlementTxId, SettlementError> {
        let mut state = self.state();
        if let Some(reason) = &state.refuse {
            return Err(SettlementError(reason.clone()));
        }
        let seq = state.htlcs.len() as u64;
        let digest = blake2b_256_multi(&[
            btc_address.as_bytes(),
            &sats.raw().to_be_bytes(),
            &expiry.as_millis().to_be_bytes(),
            &seq.to_be_bytes(),
        ]);
        let tx_id = SettlementTxId(hex::encode(digest));
        state.htlcs.push(HtlcRecord {
            tx_id: tx_id.clone(),
            btc_address: btc_address.to_string(),
            sats,
            expiry,
            completed: false,
        });
        Ok(tx_id)
    }

    fn complete_htlc(&mut self, tx_id: &SettlementTxId) -> bool {
        let mut state = self.state();
        let Some(htlc) = state
            .htlcs
            .iter_mut()
            .find(|h| &h.tx_id == tx_id && !h.completed)
        else {
            return false;
        };
        htlc.completed = true;
        state.completions += 1;
        true
    }

    fn pending_htlcs(&self) -> Vec<HtlcRecord> {
        self.state()
            .htlcs
            .iter()
            .filter(|h| !h.completed)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_complete_once() {
        let mut layer = NullSettlement::new();
        let observer = layer.clone();
        let id = layer
            .create_htlc("bc1test", SatAmount::new(30_000_000), Timestamp::from_millis(99))
            .unwrap();
        assert_eq!(id.0.len(), 64);
        assert_eq!(observer.pending_htlcs().len(), 1);

        assert!(layer.complete_htlc(&id));
        assert!(!layer.complete_htlc(&id));
        assert!(observer.pending_htlcs().is_empty());
        assert_eq!(observer.completions(), 1);
    }

    #[test]
    fn identical_payouts_get_distinct_ids() {
        let mut layer = NullSettlement::new();
        let a = layer.create_htlc("bc1x", SatAmount::new(1), Timestamp::EPOCH).unwrap();
        let b = layer.create_htlc("bc1x", SatAmount::new(1), Timestamp::EPOCH).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn refusal_lasts_until_accepted() {
        let mut layer = NullSettlement::new();
        layer.refuse_with("mempool full");
        let err = layer
            .create_htlc("bc1x", SatAmount::new(1), Timestamp::EPOCH)
            .unwrap_err();
        assert_eq!(err, SettlementError("mempool full".into()));
        assert!(layer.all_htlcs().is_empty());

        layer.accept();
        assert!(layer
            .create_htlc("bc1x", SatAmount::new(1), Timestamp::EPOCH)
            .is_ok());
        assert_eq!(layer.all_htlcs().len(), 1);
    }
}

//! The redemption engine.

use crate::error::RedemptionError;
use crate::intent::{RedemptionId, RedemptionIntent, RedemptionStatus};
use crate::settlement::SettlementLayer;
use bloom_peg::{bloom_to_sats, max_redeemable_bloom};
use bloom_supply::SharedLedger;
use bloom_types::{BloomAmount, SatAmount, Timestamp};
use std::collections::BTreeMap;

/// Default lifetime of a settlement payout: 24 hours.
pub const DEFAULT_HTLC_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Owns every redemption intent and drives the settlement layer.
///
/// Burns go through the shared supply ledger, so the engine and the mint
/// guard see the same outstanding supply.
pub struct RedemptionEngine<S> {
    ledger: SharedLedger,
    settlement: S,
    intents: BTreeMap<RedemptionId, RedemptionIntent>,
    next_id: u64,
    htlc_ttl_ms: u64,
}

impl<S: SettlementLayer> RedemptionEngine<S> {
    pub fn new(ledger: SharedLedger, settlement: S) -> Self {
        Self::with_htlc_ttl(ledger, settlement, DEFAULT_HTLC_TTL_MS)
    }

    pub fn with_htlc_ttl(ledger: SharedLedger, settlement: S, htlc_ttl_ms: u64) -> Self {
        Self {
            ledger,
            settlement,
            intents: BTreeMap::new(),
            next_id: 1,
            htlc_ttl_ms,
        }
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    /// Open a pending redemption of `bloom_amount` paid out to `btc_address`.
    ///
    /// Bounded by outstanding supply only; see [`Self::calculate_max_redeemable`]
    /// for the advisory reserve bound.
    pub fn request_redeem_bloom(
        &mut self,
        bloom_amount: BloomAmount,
        btc_address: &str,
        now: Timestamp,
    ) -> Result<RedemptionIntent, RedemptionError> {
        if bloom_amount.is_zero() {
            return Err(RedemptionError::InvalidAmount);
        }
        if btc_address.trim().is_empty() {
            return Err(RedemptionError::InvalidAddress);
        }
        let supply = self.ledger.current_supply()?;
        if bloom_amount > supply {
            return Err(RedemptionError::ExceedsSupply {
                requested: bloom_amount,
                supply,
            });
        }
        let quoted_sats = bloom_to_sats(bloom_amount).map_err(|_| RedemptionError::Overflow)?;
        let next_id = self.next_id.checked_add(1).ok_or(RedemptionError::Overflow)?;
        let expires_at = now.saturating_add_millis(self.htlc_ttl_ms);
        let settlement_tx_id = self
            .settlement
            .create_htlc(btc_address, quoted_sats, expires_at)?;

        let id = RedemptionId(self.next_id);
        self.next_id = next_id;
        let intent = RedemptionIntent {
            id,
            bloom_amount,
            btc_address: btc_address.to_string(),
            quoted_sats,
            status: RedemptionStatus::Pending,
            settlement_tx_id,
            created_at: now,
            expires_at,
            completed_at: None,
        };
        self.intents.insert(id, intent.clone());

        tracing::info!(
            %id,
            bloom_amount = bloom_amount.raw(),
            quoted_sats = quoted_sats.raw(),
            settlement_tx = %intent.settlement_tx_id,
            "redemption requested"
        );
        Ok(intent)
    }

    /// Burn the BLOOM of a confirmed payout and mark the intent completed.
    ///
    /// Only a `Pending` intent can complete. The burn happens first; if it
    /// fails the intent stays `Pending` and nothing else changes.
    pub fn complete_redemption(
        &mut self,
        id: RedemptionId,
        now: Timestamp,
    ) -> Result<RedemptionIntent, RedemptionError> {
        let Some(intent) = self.intents.get_mut(&id) else {
            return Err(RedemptionError::NotFound(id));
        };
        if intent.status != RedemptionStatus::Pending {
            tracing::info!(%id, status = ?intent.status, "duplicate redemption completion ignored");
            return Err(RedemptionError::NotPending {
                id,
                status: intent.status,
            });
        }

        let supply_after = self
            .ledger
            .record_burn(intent.bloom_amount, id.to_string(), now)?;
        intent.status = RedemptionStatus::Completed;
        intent.completed_at = Some(now);

        if !self.settlement.complete_htlc(&intent.settlement_tx_id) {
            tracing::warn!(
                %id,
                settlement_tx = %intent.settlement_tx_id,
                "settlement layer did not recognise payout as open"
            );
        }
        tracing::info!(
            %id,
            bloom_burned = intent.bloom_amount.raw(),
            supply_after = supply_after.raw(),
            "redemption completed"
        );
        Ok(intent.clone())
    }

    /// Reserve-only bound on redeemable BLOOM. Advisory; not enforced by
    /// [`Self::request_redeem_bloom`].
    pub fn calculate_max_redeemable(&self, locked_sats: SatAmount) -> BloomAmount {
        max_redeemable_bloom(locked_sats)
    }

    pub fn get_redemption_intent(&self, id: RedemptionId) -> Option<&RedemptionIntent> {
        self.intents.get(&id)
    }

    /// All intents in creation order.
    pub fn all_redemption_intents(&self) -> Vec<&RedemptionIntent> {
        self.intents.values().collect()
    }

    pub fn pending_redemptions(&self) -> Vec<&RedemptionIntent> {
        self.intents.values().filter(|i| i.is_pending()).collect()
    }

    /// Pending intents whose payout expiry has passed.
    pub fn expired_redemptions(&self, now: Timestamp) -> Vec<&RedemptionIntent> {
        self.intents.values().filter(|i| i.is_expired(now)).collect()
    }
}

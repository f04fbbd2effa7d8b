//! `PegCore` — one ledger, one guard, one redemption engine, one writer.

use std::sync::{Arc, Mutex, MutexGuard};

use bloom_attestation::{Attestation, AttestationEnvelope, AttestationSnapshot, AttestationWriter};
use bloom_guard::{MintGuard, MintReceipt, PegSnapshot};
use bloom_peg::{CollateralRatio, PegInfo};
use bloom_redemption::{RedemptionEngine, RedemptionId, RedemptionIntent, SettlementLayer};
use bloom_reserve::{ReserveFeed, StaticReserveFeed};
use bloom_supply::{LedgerView, SharedLedger, SupplyLedger};
use bloom_types::{BloomAmount, KeyPair, PublicKey, SatAmount, Timestamp};

use crate::{CoreConfig, CoreError};

/// Reserve feed shared between the guard and whoever updates it.
pub type SharedReserveFeed = Arc<dyn ReserveFeed + Send + Sync>;

/// Settlement layer owned by the redemption engine.
pub type SharedSettlement = Box<dyn SettlementLayer + Send>;

/// The assembled peg core.
///
/// Minting goes through the guard's atomic check-and-mint; redemption
/// completion burns through the same ledger, so every supply change is
/// serialized by the ledger lock. The writable ledger handle stays inside;
/// hosts only ever see a [`LedgerView`].
pub struct PegCore {
    ledger: LedgerView,
    guard: MintGuard<SharedReserveFeed>,
    redemptions: Mutex<RedemptionEngine<SharedSettlement>>,
    writer: AttestationWriter,
    signer: String,
}

impl PegCore {
    pub fn new(
        config: &CoreConfig,
        feed: SharedReserveFeed,
        settlement: SharedSettlement,
        operator: KeyPair,
    ) -> Self {
        let ledger = SharedLedger::new(SupplyLedger::new());
        let guard = MintGuard::new(feed, ledger.clone());
        let engine =
            RedemptionEngine::with_htlc_ttl(ledger.clone(), settlement, config.redemption_htlc_ttl_ms);
        tracing::info!(
            operator = %operator.public.to_hex(),
            htlc_ttl_ms = config.redemption_htlc_ttl_ms,
            "peg core assembled"
        );
        Self {
            ledger: ledger.view(),
            guard,
            redemptions: Mutex::new(engine),
            writer: AttestationWriter::new(operator),
            signer: config.signer.clone(),
        }
    }

    /// A core backed by a static reserve of `config.bootstrap_locked_sats`.
    /// The feed handle is returned so the host can update it.
    pub fn with_static_reserve(
        config: &CoreConfig,
        settlement: SharedSettlement,
        operator: KeyPair,
    ) -> (Self, Arc<StaticReserveFeed>) {
        let feed = Arc::new(StaticReserveFeed::new(SatAmount::new(u128::from(
            config.bootstrap_locked_sats,
        ))));
        let core = Self::new(config, feed.clone(), settlement, operator);
        (core, feed)
    }

    fn engine(&self) -> Result<MutexGuard<'_, RedemptionEngine<SharedSettlement>>, CoreError> {
        self.redemptions.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Read-only view of supply, totals and history.
    pub fn ledger(&self) -> &LedgerView {
        &self.ledger
    }

    pub fn operator_key(&self) -> &PublicKey {
        self.writer.public_key()
    }

    pub fn peg_info(&self) -> PegInfo {
        PegInfo::current()
    }

    pub fn current_supply(&self) -> Result<BloomAmount, CoreError> {
        Ok(self.ledger.current_supply()?)
    }

    pub fn locked_sats(&self) -> Result<SatAmount, CoreError> {
        Ok(self.guard.feed().locked_btc_sats()?)
    }

    pub fn collateralization(&self) -> Result<CollateralRatio, CoreError> {
        Ok(self.guard.collateralization()?)
    }

    pub fn can_mint(&self, amount: BloomAmount) -> Result<bool, CoreError> {
        Ok(self.guard.can_mint(amount)?)
    }

    pub fn mint(
        &self,
        amount: BloomAmount,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<MintReceipt, CoreError> {
        Ok(self.guard.mint(amount, reason, now)?)
    }

    pub fn request_redemption(
        &self,
        amount: BloomAmount,
        btc_address: &str,
        now: Timestamp,
    ) -> Result<RedemptionIntent, CoreError> {
        Ok(self.engine()?.request_redeem_bloom(amount, btc_address, now)?)
    }

    pub fn complete_redemption(
        &self,
        id: RedemptionId,
        now: Timestamp,
    ) -> Result<RedemptionIntent, CoreError> {
        Ok(self.engine()?.complete_redemption(id, now)?)
    }

    pub fn redemption_intent(&self, id: RedemptionId) -> Result<Option<RedemptionIntent>, CoreError> {
        Ok(self.engine()?.get_redemption_intent(id).cloned())
    }

    pub fn pending_redemptions(&self) -> Result<Vec<RedemptionIntent>, CoreError> {
        Ok(self.engine()?.pending_redemptions().into_iter().cloned().collect())
    }

    pub fn expired_redemptions(&self, now: Timestamp) -> Result<Vec<RedemptionIntent>, CoreError> {
        Ok(self
            .engine()?
            .expired_redemptions(now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Reserve-only redemption bound at the current feed value. Advisory.
    pub fn max_redeemable(&self) -> Result<BloomAmount, CoreError> {
        let locked = self.locked_sats()?;
        Ok(self.engine()?.calculate_max_redeemable(locked))
    }

    /// Reserve and supply read at one moment, under the mint lock.
    pub fn peg_snapshot(&self, now: Timestamp) -> Result<PegSnapshot, CoreError> {
        Ok(self.guard.peg_snapshot(now)?)
    }

    fn attestation_snapshot(&self, now: Timestamp) -> Result<AttestationSnapshot, CoreError> {
        let snap = self.guard.peg_snapshot(now)?;
        Ok(AttestationSnapshot::from_reserve(&snap.reserve, snap.outstanding)?)
    }

    /// Sign the current reserve/supply state.
    pub fn attest(&self, now: Timestamp) -> Result<Attestation, CoreError> {
        Ok(self.writer.write_attestation(self.attestation_snapshot(now)?))
    }

    /// Sign the current reserve as an exportable envelope.
    pub fn attest_envelope(&self, now: Timestamp) -> Result<AttestationEnvelope, CoreError> {
        let snapshot = self.attestation_snapshot(now)?;
        Ok(self.writer.write_envelope(&self.signer, &snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_attestation::{verify_attestation, verify_envelope};
    use bloom_crypto::keypair_from_seed;
    use bloom_nullables::NullSettlement;

    fn core(locked: u64) -> (PegCore, Arc<StaticReserveFeed>) {
        let config = CoreConfig {
            bootstrap_locked_sats: locked,
            ..CoreConfig::default()
        };
        PegCore::with_static_reserve(
            &config,
            Box::new(NullSettlement::new()),
            keypair_from_seed(&[3; 32]),
        )
    }

    #[test]
    fn bootstrap_reserve_is_used() {
        let (core, feed) = core(100_000_000);
        assert_eq!(core.locked_sats().unwrap(), SatAmount::new(100_000_000));
        feed.set_locked_sats(SatAmount::new(200_000_000));
        assert_eq!(core.max_redeemable().unwrap(), BloomAmount::new(20));
    }

    #[test]
    fn attestation_reflects_ledger() {
        let (core, _) = core(100_000_000);
        let now = Timestamp::from_millis(5_000);
        core.mint(BloomAmount::new(4), "seed", now).unwrap();
        let att = core.attest(now).unwrap();
        assert!(verify_attestation(&att));
        assert_eq!(att.snapshot().outstanding_bloom(), BloomAmount::new(4));
        assert_eq!(att.snapshot().collateralization_ratio(), "2.50000000");
        assert_eq!(att.public_key(), core.operator_key());
    }

    #[test]
    fn ledger_view_sees_only_guarded_mints() {
        let (core, _) = core(0);
        let now = Timestamp::from_millis(1);
        assert!(core.mint(BloomAmount::new(1), "unbacked", now).is_err());

        let view = core.ledger();
        assert_eq!(view.current_supply().unwrap(), BloomAmount::ZERO);
        assert!(view.mint_history().unwrap().is_empty());
        assert!(view.invariant_holds().unwrap());
        assert!(core.collateralization().unwrap().is_fully_reserved());
    }

    #[test]
    fn envelope_carries_configured_signer() {
        let (core, _) = core(50_000_000);
        let env = core.attest_envelope(Timestamp::from_millis(7)).unwrap();
        assert!(verify_envelope(&env));
        assert_eq!(env.payload.signer, "bloom-operator");
        assert_eq!(env.payload.sats_total, "50000000");
    }
}

//! End-to-end tests wiring the full peg core with nullable collaborators:
//! mint → redeem → settle → burn → attest, plus concurrency and
//! degraded-reserve behaviour.

use std::sync::Arc;
use std::thread;

use bloom_attestation::{
    is_attestation_stale, most_recent_valid_attestation, require_fresh_attestation,
    verify_attestation, AttestationError,
};
use bloom_core::{CoreConfig, CoreError, PegCore};
use bloom_crypto::keypair_from_seed;
use bloom_guard::GuardError;
use bloom_nullables::{NullClock, NullReserveFeed, NullSettlement, NullSpvSource, SpvMode};
use bloom_peg::CollateralRatio;
use bloom_redemption::{RedemptionError, RedemptionStatus, SettlementLayer};
use bloom_reserve::{ComposableReserveFeed, ReserveSource, SpvProof, StaticReserveFeed};
use bloom_types::{BloomAmount, ProofHash, SatAmount, Timestamp};

const ONE_BTC: u128 = 100_000_000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bloom(n: u128) -> BloomAmount {
    BloomAmount::new(n)
}

fn core_with(feed: Arc<NullReserveFeed>, settlement: NullSettlement) -> PegCore {
    PegCore::new(
        &CoreConfig::default(),
        feed,
        Box::new(settlement),
        keypair_from_seed(&[7; 32]),
    )
}

// ---------------------------------------------------------------------------
// 1. The reference scenario
// ---------------------------------------------------------------------------

#[test]
fn mint_redeem_settle_remint() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let settlement = NullSettlement::new();
    let core = core_with(feed, settlement.clone());

    // 1 BTC locked backs exactly 10 BLOOM.
    let receipt = core.mint(bloom(10), "initial issuance", clock.now()).unwrap();
    assert_eq!(receipt.new_supply, bloom(10));
    assert_eq!(receipt.required_sats, SatAmount::new(ONE_BTC));
    assert!(core.collateralization().unwrap().is_fully_reserved());
    assert_eq!(core.collateralization().unwrap().to_string(), "1.00000000");

    // One more is unbacked.
    let err = core.mint(bloom(1), "over-issue", clock.now()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Guard(GuardError::CollateralShortfall { required, locked })
            if required == SatAmount::new(110_000_000) && locked == SatAmount::new(ONE_BTC)
    ));
    assert_eq!(core.current_supply().unwrap(), bloom(10));

    // Redeem 3 BLOOM: quote is exact, intent pending, supply untouched.
    clock.advance(1_000);
    let intent = core.request_redemption(bloom(3), "bc1test", clock.now()).unwrap();
    assert_eq!(intent.quoted_sats, SatAmount::new(30_000_000));
    assert_eq!(intent.status, RedemptionStatus::Pending);
    assert_eq!(core.current_supply().unwrap(), bloom(10));
    assert_eq!(settlement.pending_htlcs().len(), 1);
    assert_eq!(settlement.pending_htlcs()[0].btc_address, "bc1test");

    // Settlement confirmed: burn happens.
    clock.advance(60_000);
    let done = core.complete_redemption(intent.id, clock.now()).unwrap();
    assert_eq!(done.status, RedemptionStatus::Completed);
    assert_eq!(done.completed_at, Some(clock.now()));
    assert_eq!(core.current_supply().unwrap(), bloom(7));
    assert!(settlement.pending_htlcs().is_empty());

    let ratio = core.collateralization().unwrap();
    assert!(ratio.as_f64() > 1.0);
    assert_eq!(ratio.to_string(), "1.42857142");

    // Reserve still holds 1 BTC, so 3 more mint back to exactly 1.0.
    core.mint(bloom(3), "re-issue", clock.now()).unwrap();
    assert_eq!(core.current_supply().unwrap(), bloom(10));
    assert_eq!(
        core.collateralization().unwrap(),
        CollateralRatio::of(SatAmount::new(ONE_BTC), bloom(10)).unwrap()
    );
    assert_eq!(core.collateralization().unwrap().to_string(), "1.00000000");

    let ledger = core.ledger();
    assert!(ledger.invariant_holds().unwrap());
    assert_eq!(ledger.total_minted().unwrap(), bloom(13));
    assert_eq!(ledger.total_burned().unwrap(), bloom(3));
    assert_eq!(ledger.burn_history().unwrap()[0].reason, intent.id.to_string());
}

// ---------------------------------------------------------------------------
// 2. Redemption idempotency and failure paths
// ---------------------------------------------------------------------------

#[test]
fn completing_twice_burns_once() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let settlement = NullSettlement::new();
    let core = core_with(feed, settlement.clone());
    core.mint(bloom(10), "issue", clock.now()).unwrap();

    let intent = core.request_redemption(bloom(2), "bc1q", clock.now()).unwrap();
    core.complete_redemption(intent.id, clock.now()).unwrap();
    let second = core.complete_redemption(intent.id, clock.now()).unwrap_err();

    assert!(matches!(
        second,
        CoreError::Redemption(RedemptionError::NotPending {
            status: RedemptionStatus::Completed,
            ..
        })
    ));
    assert_eq!(core.current_supply().unwrap(), bloom(8));
    assert_eq!(settlement.completions(), 1);
    assert_eq!(core.ledger().burn_history().unwrap().len(), 1);
}

#[test]
fn redemption_rejections_leave_no_trace() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let settlement = NullSettlement::new();
    let core = core_with(feed, settlement.clone());
    core.mint(bloom(5), "issue", clock.now()).unwrap();

    assert!(matches!(
        core.request_redemption(bloom(6), "bc1q", clock.now()),
        Err(CoreError::Redemption(RedemptionError::ExceedsSupply { .. }))
    ));
    assert!(matches!(
        core.request_redemption(bloom(0), "bc1q", clock.now()),
        Err(CoreError::Redemption(RedemptionError::InvalidAmount))
    ));
    assert!(matches!(
        core.request_redemption(bloom(1), "  ", clock.now()),
        Err(CoreError::Redemption(RedemptionError::InvalidAddress))
    ));

    settlement.refuse_with("node offline");
    assert!(matches!(
        core.request_redemption(bloom(1), "bc1q", clock.now()),
        Err(CoreError::Redemption(RedemptionError::Settlement(_)))
    ));

    assert!(core.pending_redemptions().unwrap().is_empty());
    assert!(settlement.all_htlcs().is_empty());
    assert_eq!(core.current_supply().unwrap(), bloom(5));
}

#[test]
fn overlapping_redemptions_cannot_burn_past_zero() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let core = core_with(feed, NullSettlement::new());
    core.mint(bloom(5), "issue", clock.now()).unwrap();

    let a = core.request_redemption(bloom(4), "bc1a", clock.now()).unwrap();
    let b = core.request_redemption(bloom(4), "bc1b", clock.now()).unwrap();
    core.complete_redemption(a.id, clock.now()).unwrap();

    let err = core.complete_redemption(b.id, clock.now()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Redemption(RedemptionError::Supply(_))
    ));
    assert_eq!(core.current_supply().unwrap(), bloom(1));
    assert!(core.redemption_intent(b.id).unwrap().unwrap().is_pending());
}

#[test]
fn expired_payouts_are_listed_not_cancelled() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let config = CoreConfig {
        redemption_htlc_ttl_ms: 10_000,
        ..CoreConfig::default()
    };
    let core = PegCore::new(
        &config,
        feed,
        Box::new(NullSettlement::new()),
        keypair_from_seed(&[7; 32]),
    );
    core.mint(bloom(5), "issue", clock.now()).unwrap();
    let intent = core.request_redemption(bloom(1), "bc1q", clock.now()).unwrap();
    assert_eq!(intent.expires_at, clock.now().saturating_add_millis(10_000));

    clock.advance(9_999);
    assert!(core.expired_redemptions(clock.now()).unwrap().is_empty());
    clock.advance(1);
    assert_eq!(core.expired_redemptions(clock.now()).unwrap().len(), 1);
    assert_eq!(core.pending_redemptions().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// 3. Reserve feed behaviour
// ---------------------------------------------------------------------------

#[test]
fn reserve_outage_blocks_minting_without_side_effects() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let core = core_with(feed.clone(), NullSettlement::new());
    core.mint(bloom(2), "issue", clock.now()).unwrap();

    feed.set_down(true);
    assert!(matches!(
        core.mint(bloom(1), "issue", clock.now()),
        Err(CoreError::Guard(GuardError::Reserve(_)))
    ));
    assert!(core.attest(clock.now()).is_err());
    assert_eq!(core.current_supply().unwrap(), bloom(2));

    feed.set_down(false);
    core.mint(bloom(1), "issue", clock.now()).unwrap();
}

#[test]
fn reserve_drop_turns_ratio_below_one() {
    let clock = NullClock::default();
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let core = core_with(feed.clone(), NullSettlement::new());
    core.mint(bloom(10), "issue", clock.now()).unwrap();

    feed.set_locked_sats(SatAmount::new(ONE_BTC / 2));
    let ratio = core.collateralization().unwrap();
    assert!(!ratio.is_fully_reserved());
    assert!(!core.can_mint(bloom(1)).unwrap());
    // Advisory reserve bound is lower than outstanding supply, but redemption
    // is bounded by supply only.
    assert_eq!(core.max_redeemable().unwrap(), bloom(5));
    assert!(core.request_redemption(bloom(8), "bc1q", clock.now()).is_ok());
}

#[test]
fn composable_feed_falls_back_once_and_labels_snapshot() {
    let clock = NullClock::default();
    let spv = Arc::new(NullSpvSource::new(SpvMode::Failing("peer timeout".into())));
    let fallback = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let feed = Arc::new(ComposableReserveFeed::new(spv.clone(), fallback.clone()));
    let core = PegCore::new(
        &CoreConfig::default(),
        feed,
        Box::new(NullSettlement::new()),
        keypair_from_seed(&[7; 32]),
    );

    core.mint(bloom(10), "issue", clock.now()).unwrap();
    assert_eq!(spv.calls(), 1);
    assert_eq!(fallback.reads(), 1);

    let snap = core.peg_snapshot(clock.now()).unwrap();
    assert_eq!(snap.reserve.source, ReserveSource::Fallback);
    assert!(snap.reserve.header_hash.is_zero());

    let proof = SpvProof {
        locked_sats: SatAmount::new(2 * ONE_BTC),
        header_hash: ProofHash::new([0xAB; 32]),
        merkle_root: ProofHash::new([0xCD; 32]),
        utxo_count: 3,
    };
    spv.set_mode(SpvMode::Present(proof));
    let reads_before = fallback.reads();
    let att = core.attest(clock.now()).unwrap();
    assert_eq!(fallback.reads(), reads_before);
    assert_eq!(att.snapshot().locked_sats(), SatAmount::new(2 * ONE_BTC));
    assert_eq!(att.snapshot().utxo_count(), 3);
    assert_eq!(att.snapshot().header_hash(), ProofHash::new([0xAB; 32]));
    assert_eq!(att.snapshot().collateralization_ratio(), "2.00000000");
    core.mint(bloom(10), "issue", clock.now()).unwrap();
}

// ---------------------------------------------------------------------------
// 4. Concurrency: no interleaving can mint past the reserve
// ---------------------------------------------------------------------------

#[test]
fn concurrent_mints_never_exceed_reserve() {
    let feed = Arc::new(StaticReserveFeed::new(SatAmount::new(5 * ONE_BTC)));
    let core = Arc::new(PegCore::new(
        &CoreConfig::default(),
        feed,
        Box::new(NullSettlement::new()),
        keypair_from_seed(&[7; 32]),
    ));

    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let core = Arc::clone(&core);
            thread::spawn(move || {
                let mut admitted = 0u128;
                for i in 0..20u64 {
                    let now = Timestamp::from_millis(t * 1_000 + i);
                    if core.mint(bloom(1), format!("thread-{t}"), now).is_ok() {
                        admitted += 1;
                    }
                }
                admitted
            })
        })
        .collect();

    let admitted: u128 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(admitted, 50);
    assert_eq!(core.current_supply().unwrap(), bloom(50));
    assert!(core.collateralization().unwrap().is_fully_reserved());
    assert!(core.ledger().invariant_holds().unwrap());
}

// ---------------------------------------------------------------------------
// 5. Attestations over real core state
// ---------------------------------------------------------------------------

#[test]
fn attestations_select_freshest_and_expire() {
    let clock = NullClock::default();
    let max_age = CoreConfig::default().attestation_max_age_ms;
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let core = core_with(feed, NullSettlement::new());

    core.mint(bloom(2), "issue", clock.now()).unwrap();
    let first = core.attest(clock.now()).unwrap();
    clock.advance(60_000);
    core.mint(bloom(3), "issue", clock.now()).unwrap();
    let second = core.attest(clock.now()).unwrap();

    assert!(verify_attestation(&first));
    assert!(verify_attestation(&second));
    assert!(first.snapshot().ratio_matches_reserves());

    let list = vec![second.clone(), first.clone()];
    let best = most_recent_valid_attestation(&list, max_age, clock.now()).unwrap();
    assert_eq!(best.snapshot().outstanding_bloom(), bloom(5));

    clock.advance(max_age);
    assert!(!is_attestation_stale(&second, max_age, clock.now()));
    assert!(require_fresh_attestation(&second, max_age, clock.now()).is_ok());
    clock.advance(1);
    assert!(is_attestation_stale(&second, max_age, clock.now()));
    assert!(matches!(
        require_fresh_attestation(&second, max_age, clock.now()),
        Err(AttestationError::Stale { .. })
    ));
    assert!(most_recent_valid_attestation(&list, max_age, clock.now()).is_none());
}

#[test]
fn attestation_from_another_operator_is_not_trusted_by_key() {
    let feed = Arc::new(NullReserveFeed::new(SatAmount::new(ONE_BTC)));
    let core_a = core_with(feed.clone(), NullSettlement::new());
    let core_b = PegCore::new(
        &CoreConfig::default(),
        feed,
        Box::new(NullSettlement::new()),
        keypair_from_seed(&[8; 32]),
    );
    let now = Timestamp::from_millis(1);
    let att = core_b.attest(now).unwrap();
    // Valid signature, but not from operator A.
    assert!(verify_attestation(&att));
    assert_ne!(att.public_key(), core_a.operator_key());
}

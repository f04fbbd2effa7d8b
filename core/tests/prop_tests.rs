use std::sync::Arc;

use bloom_core::{CoreConfig, PegCore};
use bloom_crypto::keypair_from_seed;
use bloom_nullables::{NullReserveFeed, NullSettlement};
use bloom_peg::bloom_to_sats;
use bloom_redemption::RedemptionId;
use bloom_types::{BloomAmount, SatAmount, Timestamp};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Mint(u128),
    Redeem(u128),
    Complete(u64),
    SetReserve(u128),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u128..20).prop_map(Op::Mint),
        (1u128..20).prop_map(Op::Redeem),
        (0u64..10).prop_map(Op::Complete),
        (0u128..=3_000_000_000).prop_map(Op::SetReserve),
    ]
}

proptest! {
    /// Whatever happens to the reserve afterwards, every mint that succeeds
    /// was fully backed at the moment it was admitted, and the ledger's
    /// audit invariant always holds.
    #[test]
    fn admitted_mints_are_always_backed(ops in prop::collection::vec(arb_op(), 1..60)) {
        let feed = Arc::new(NullReserveFeed::new(SatAmount::new(1_000_000_000)));
        let core = PegCore::new(
            &CoreConfig::default(),
            feed.clone(),
            Box::new(NullSettlement::new()),
            keypair_from_seed(&[1; 32]),
        );

        for (i, op) in ops.into_iter().enumerate() {
            let now = Timestamp::from_millis(i as u64);
            match op {
                Op::Mint(n) => {
                    if let Ok(receipt) = core.mint(BloomAmount::new(n), "prop", now) {
                        prop_assert!(receipt.required_sats <= receipt.locked_sats);
                        prop_assert_eq!(
                            receipt.required_sats,
                            bloom_to_sats(receipt.new_supply).unwrap()
                        );
                    }
                }
                Op::Redeem(n) => {
                    let supply = core.current_supply().unwrap();
                    let result = core.request_redemption(BloomAmount::new(n), "bc1prop", now);
                    prop_assert_eq!(result.is_ok(), n <= supply.raw());
                }
                Op::Complete(id) => {
                    let _ = core.complete_redemption(RedemptionId(id), now);
                }
                Op::SetReserve(sats) => feed.set_locked_sats(SatAmount::new(sats)),
            }
            prop_assert!(core.ledger().invariant_holds().unwrap());
        }
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use bloom_supply::SupplyLedger;
use bloom_types::{BloomAmount, Timestamp};

// Arbitrary mint/burn sequences: the ledger never panics and its audit
// invariant holds after every step.
fuzz_target!(|data: &[u8]| {
    let mut ledger = SupplyLedger::new();
    for (i, chunk) in data.chunks_exact(9).enumerate() {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&chunk[1..]);
        let amount = BloomAmount::new(u128::from(u64::from_le_bytes(raw)));
        let now = Timestamp::from_millis(i as u64);
        if chunk[0] & 1 == 0 {
            let _ = ledger.record_mint(amount, "fuzz", now);
        } else {
            let _ = ledger.record_burn(amount, "fuzz", now);
        }
        assert!(ledger.invariant_holds());
    }
});

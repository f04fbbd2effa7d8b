#![no_main]

use libfuzzer_sys::fuzz_target;

use bloom_attestation::{most_recent_valid_attestation, verify_attestation, Attestation};
use bloom_types::Timestamp;

// Untrusted attestation JSON must deserialize or fail, and verification
// must return a boolean, for any input.
fuzz_target!(|data: &[u8]| {
    if let Ok(att) = serde_json::from_slice::<Attestation>(data) {
        let _ = verify_attestation(&att);
        let _ = att.snapshot().ratio_matches_reserves();
        let _ = att.snapshot().canonical_bytes();
        let list = [att];
        let _ = most_recent_valid_attestation(&list, 0, Timestamp::EPOCH);
    }
});

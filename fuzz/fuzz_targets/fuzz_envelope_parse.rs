#![no_main]

use libfuzzer_sys::fuzz_target;

use bloom_attestation::{is_envelope_stale, verify_envelope, AttestationEnvelope};
use bloom_types::Timestamp;

// Envelopes arrive from dashboards and files; parsing and verifying
// arbitrary bytes must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(envelope) = AttestationEnvelope::from_json(text) {
        let _ = verify_envelope(&envelope);
        let _ = envelope.sats_total();
        let _ = is_envelope_stale(&envelope, 1_800_000, Timestamp::from_millis(u64::MAX));
        let _ = envelope.payload.canonical_bytes();
    }
});

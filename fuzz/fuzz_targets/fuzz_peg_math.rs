#![no_main]

use libfuzzer_sys::fuzz_target;

use bloom_peg::{bloom_to_sats, sats_to_bloom, CollateralRatio};
use bloom_types::{BloomAmount, SatAmount};

fn read_u128(bytes: &[u8]) -> u128 {
    let mut buf = [0u8; 16];
    buf.copy_from_slice(bytes);
    u128::from_le_bytes(buf)
}

// Peg arithmetic over the full u128 range: overflow is an error, never a
// panic or a wrapped value.
fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let bloom = BloomAmount::new(read_u128(&data[..16]));
    let sats = SatAmount::new(read_u128(&data[16..32]));

    if let Ok(quoted) = bloom_to_sats(bloom) {
        assert_eq!(sats_to_bloom(quoted), bloom);
    }
    let floored = sats_to_bloom(sats);
    if let Ok(back) = bloom_to_sats(floored) {
        assert!(back <= sats);
    }
    if let Ok(ratio) = CollateralRatio::of(sats, bloom) {
        let _ = ratio.to_string();
        let _ = ratio.is_fully_reserved();
    }
});

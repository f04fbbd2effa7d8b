use bloom_crypto::{blake2b_256_multi, keypair_from_hex_seed, verify_signature, sign_message};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Same parts a settlement layer hashes into a payout id.
fn settlement_id_parts(seq: u64) -> (Vec<u8>, [u8; 16], [u8; 8], [u8; 8]) {
    (
        b"bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_vec(),
        30_000_000u128.to_be_bytes(),
        1_700_086_400_000u64.to_be_bytes(),
        seq.to_be_bytes(),
    )
}

fn settlement_id_bench(c: &mut Criterion) {
    let (addr, sats, expiry, seq) = settlement_id_parts(42);
    c.bench_function("settlement_id_blake2b", |b| {
        let parts: [&[u8]; 4] = [&addr, &sats, &expiry, &seq];
        b.iter(|| blake2b_256_multi(black_box(&parts)))
    });
}

fn operator_seed_bench(c: &mut Criterion) {
    let seed = "2a".repeat(32);
    c.bench_function("operator_key_from_hex_seed", |b| {
        b.iter(|| keypair_from_hex_seed(black_box(&seed)))
    });
}

fn snapshot_line_sign_verify_bench(c: &mut Criterion) {
    let kp = keypair_from_hex_seed(&"07".repeat(32)).unwrap();
    let mut group = c.benchmark_group("sign_verify_by_utxo_lines");
    for lines in [1usize, 16, 256] {
        let message: Vec<u8> = (0..lines)
            .flat_map(|i| format!("utxo_{i}=100000000\n").into_bytes())
            .collect();
        let sig = sign_message(&message, &kp.private);
        group.bench_with_input(BenchmarkId::new("sign", lines), &message, |b, m| {
            b.iter(|| sign_message(black_box(m), &kp.private))
        });
        group.bench_with_input(BenchmarkId::new("verify", lines), &message, |b, m| {
            b.iter(|| verify_signature(black_box(m), &sig, &kp.public))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    settlement_id_bench,
    operator_seed_bench,
    snapshot_line_sign_verify_bench
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn secp256k1_sign_bench(c: &mut Criterion) {
    let kp = plasma_crypto::keypair_from_seed(&[7u8; 32]);
    let hash = plasma_crypto::sha256(b"bench transfer");

    c.bench_function("secp256k1_sign_recoverable", |b| {
        b.iter(|| plasma_crypto::sign_recoverable(black_box(&hash), &kp.private))
    });
}

fn secp256k1_recover_bench(c: &mut Criterion) {
    let kp = plasma_crypto::keypair_from_seed(&[7u8; 32]);
    let hash = plasma_crypto::sha256(b"bench transfer");
    let sig = plasma_crypto::sign_recoverable(&hash, &kp.private).unwrap();

    c.bench_function("secp256k1_recover", |b| {
        b.iter(|| plasma_crypto::recover_public_key(black_box(&hash), &sig))
    });
}

fn sha256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("sha256_256B", |b| {
        b.iter(|| plasma_crypto::sha256(black_box(&data)))
    });
}

fn hash_pair_bench(c: &mut Criterion) {
    let left = [1u8; 32];
    let right = [2u8; 32];

    c.bench_function("sha256_hash_pair", |b| {
        b.iter(|| plasma_crypto::hash_pair(black_box(&left), black_box(&right)))
    });
}

fn adapt_bench(c: &mut Criterion) {
    let kp = plasma_crypto::keypair_from_seed(&[7u8; 32]);
    let hash = plasma_crypto::sha256(b"bench transfer");
    let sig = plasma_crypto::sign_recoverable(&hash, &kp.private).unwrap();
    let compact = plasma_crypto::to_compact(&sig);

    c.bench_function("signature_adapt", |b| {
        b.iter(|| plasma_crypto::adapt(black_box(&compact)))
    });
}

criterion_group!(
    benches,
    secp256k1_sign_bench,
    secp256k1_recover_bench,
    sha256_bench,
    hash_pair_bench,
    adapt_bench,
);
criterion_main!(benches);

// Hashing, derivation, signing, and verification benchmarks for Veridoc.
//
// Covers the CPU-bound hot paths: document hashing at several sizes,
// mnemonic key derivation, record signing, and sidecar-free verification.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use veridoc::address::{encode, NetworkPrefix};
use veridoc::crypto::hash::sha256_array;
use veridoc::crypto::keys::DocKeypair;
use veridoc::signer::{sign_bytes, verify_record};

const TEST_MNEMONIC: &str =
    "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

fn bench_document_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash/sha256");
    for size in [1_024usize, 64 * 1_024, 1_024 * 1_024] {
        let document = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, doc| {
            b.iter(|| sha256_array(doc));
        });
    }
    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    c.bench_function("sr25519/derive_from_mnemonic", |b| {
        b.iter(|| DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap());
    });
}

fn bench_address_encode(c: &mut Criterion) {
    let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
    let key = keypair.public_key_bytes();
    let network = NetworkPrefix::identity();

    c.bench_function("address/encode", |b| {
        b.iter(|| encode(&key, network).unwrap());
    });
}

fn bench_sign_record(c: &mut Criterion) {
    let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
    let document = vec![0x5Au8; 64 * 1_024];

    c.bench_function("sr25519/sign_record_64k", |b| {
        b.iter(|| sign_bytes(&document, "bench.pdf", &keypair, "Bench", 0).unwrap());
    });
}

fn bench_verify_record(c: &mut Criterion) {
    let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
    let document = vec![0x5Au8; 64 * 1_024];
    let record = sign_bytes(&document, "bench.pdf", &keypair, "Bench", 0).unwrap();

    c.bench_function("sr25519/verify_record_64k", |b| {
        b.iter(|| verify_record(&document, &record));
    });
}

criterion_group!(
    benches,
    bench_document_hash,
    bench_key_derivation,
    bench_address_encode,
    bench_sign_record,
    bench_verify_record
);
criterion_main!(benches);

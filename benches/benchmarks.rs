//! Criterion benchmarks for faceseek.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use tempfile::TempDir;

use faceseek::extract::Frame;
use faceseek::matcher::classify;
use faceseek::store::record::IdentityRecord;
use faceseek::store::IdentityStore;
use faceseek::types::{Embedding, Identity, StoreSnapshot, DEFAULT_DIMENSION};

fn random_embedding(rng: &mut impl Rng) -> Embedding {
    let values: Vec<f32> = (0..DEFAULT_DIMENSION)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect();
    Embedding::new(values).unwrap()
}

/// A snapshot of `identity_count` identities with `per_identity` embeddings
/// each.
fn make_snapshot(identity_count: usize, per_identity: usize) -> StoreSnapshot {
    let mut rng = rand::thread_rng();
    let identities = (0..identity_count)
        .map(|i| Identity {
            name: format!("person_{}", i),
            embeddings: (0..per_identity)
                .map(|_| random_embedding(&mut rng))
                .collect(),
        })
        .collect();
    StoreSnapshot::new(identities)
}

fn bench_classify_1k(c: &mut Criterion) {
    let snapshot = make_snapshot(1_000, 5);
    let mut rng = rand::thread_rng();
    let query = random_embedding(&mut rng);

    c.bench_function("classify_1k_identities_128dim", |b| {
        b.iter(|| {
            let _ = classify(&query, &snapshot, 0.6);
        })
    });
}

fn bench_classify_10k(c: &mut Criterion) {
    let snapshot = make_snapshot(10_000, 1);
    let mut rng = rand::thread_rng();
    let query = random_embedding(&mut rng);

    c.bench_function("classify_10k_identities_128dim", |b| {
        b.iter(|| {
            let _ = classify(&query, &snapshot, 0.6);
        })
    });
}

fn bench_record_write(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let embeddings: Vec<Embedding> = (0..100).map(|_| random_embedding(&mut rng)).collect();
    let record = IdentityRecord::new(DEFAULT_DIMENSION, embeddings);
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.fvec");

    c.bench_function("record_write_100_embeddings", |b| {
        b.iter(|| {
            record.write_to_file(&path).unwrap();
        })
    });
}

fn bench_store_load(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let mut rng = rand::thread_rng();
    {
        let mut store = IdentityStore::open(tmp.path(), DEFAULT_DIMENSION).unwrap();
        for i in 0..500 {
            store
                .add(&format!("person_{}", i), random_embedding(&mut rng))
                .unwrap();
        }
    }

    c.bench_function("store_load_500_identities", |b| {
        b.iter(|| {
            let _ = IdentityStore::open(tmp.path(), DEFAULT_DIMENSION).unwrap();
        })
    });
}

fn bench_frame_downscale(c: &mut Criterion) {
    // 1080p RGB frame scaled to a quarter in each dimension.
    let pixels = vec![128u8; 1920 * 1080 * 3];
    let frame = Frame::new(1920, 1080, pixels).unwrap();

    c.bench_function("downscale_1080p_quarter", |b| {
        b.iter(|| {
            let _ = frame.downscale(0.25);
        })
    });
}

criterion_group!(
    benches,
    bench_classify_1k,
    bench_classify_10k,
    bench_record_write,
    bench_store_load,
    bench_frame_downscale,
);
criterion_main!(benches);

//! Search benchmarks
//!
//! Kept small enough to finish within a minute locally and in CI.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hashsearch::{
    Alphabet, Encoding, HashFn, Indexer, PrefixPolicy, SearchConfig, SearchEngine,
    SecondPreimagePolicy, Sha256Hex, SimpleHash, search_sequential,
};

/// Indices scanned by the exhaustive benchmarks
const SCAN_RANGE: u64 = 1 << 16;

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

fn bench_indexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexer");
    let indexer = Indexer::new(Alphabet::default(), 8).unwrap();
    let mut buf = String::with_capacity(16);

    group.bench_function("encode_into", |b| {
        b.iter(|| indexer.encode_into(black_box(123_456_789), &mut buf))
    });

    group.bench_function("encode_variable_into", |b| {
        b.iter(|| indexer.encode_variable_into(black_box(u64::MAX / 3), &mut buf))
    });

    group.bench_function("decode", |b| b.iter(|| indexer.decode(black_box("A0bC9zZ1"))));

    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");

    group.bench_function("simple", |b| {
        b.iter(|| SimpleHash.digest(black_box(b"A0bC9zZ1")))
    });

    group.bench_function("sha256", |b| {
        b.iter(|| Sha256Hex.digest(black_box(b"bitcoinA0bC9zZ1")))
    });

    group.finish();
}

fn bench_exhaustive_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_scan");

    // The target digest is unreachable in the range, so every index is visited.
    let policy = SecondPreimagePolicy::new(SimpleHash, "eliam");
    let config = SearchConfig::default();
    let engine = SearchEngine::new(config).unwrap();

    group.bench_function("sequential", |b| {
        b.iter(|| search_sequential(engine.indexer(), Encoding::Fixed, 0..SCAN_RANGE, &policy))
    });

    group.bench_function("parallel", |b| {
        b.iter(|| engine.search(0..SCAN_RANGE, &policy).unwrap())
    });

    group.finish();
}

fn bench_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    let policy = SecondPreimagePolicy::new(SimpleHash, "eliam");

    for chunk_size in [64u64, 4096, 65_536] {
        let engine = SearchEngine::new(SearchConfig::default().with_chunk_size(chunk_size)).unwrap();
        group.bench_function(format!("chunk_{chunk_size}"), |b| {
            b.iter(|| engine.search(0..SCAN_RANGE, &policy).unwrap())
        });
    }

    group.finish();
}

fn bench_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix");
    let engine =
        SearchEngine::new(SearchConfig::default().with_encoding(Encoding::Variable)).unwrap();
    let policy = PrefixPolicy::new(Sha256Hex, "cafe").unwrap();

    group.bench_function("sha256_cafe", |b| {
        b.iter(|| engine.search(0..u64::MAX, &policy).unwrap())
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets =
        bench_indexer,
        bench_hash,
        bench_exhaustive_scan,
        bench_chunk_size,
        bench_prefix,
}

criterion_main!(benches);

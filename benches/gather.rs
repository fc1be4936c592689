//! Benchmarks for index construction and gather.
//!
//! Measures the two hot paths: the per-layer representative scan behind
//! `best_overlap`, and the repeated search-and-subtract loop of `gather`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

use strata::{IndexParams, MultiResolutionIndex, ScaledSketch};

const SCALED: u64 = 1000;

/// Below the coarsest layer's retention bound, so every layer keeps them all.
const HASH_SPACE: u64 = u64::MAX / 100_000;

fn random_sketch(rng: &mut StdRng, len: usize) -> ScaledSketch {
    ScaledSketch::from_hashes((0..len).map(|_| rng.gen_range(0..HASH_SPACE)), SCALED)
}

fn build_index(n_refs: usize, sketch_len: usize) -> (MultiResolutionIndex<ScaledSketch>, Vec<ScaledSketch>) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut index = MultiResolutionIndex::new(IndexParams::default()).unwrap();
    let sketches: Vec<ScaledSketch> = (0..n_refs)
        .map(|_| random_sketch(&mut rng, sketch_len))
        .collect();
    for s in &sketches {
        index.add_reference(s.clone()).unwrap();
    }
    (index, sketches)
}

fn bench_add_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_reference");
    for n_refs in [100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n_refs), &n_refs, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            let sketches: Vec<ScaledSketch> =
                (0..n).map(|_| random_sketch(&mut rng, 500)).collect();
            b.iter(|| {
                let mut index = MultiResolutionIndex::new(IndexParams::default()).unwrap();
                for s in &sketches {
                    index.add_reference(s.clone()).unwrap();
                }
                black_box(index.len())
            });
        });
    }
    group.finish();
}

fn bench_best_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_overlap");
    for n_refs in [100, 1000] {
        let (index, sketches) = build_index(n_refs, 500);
        group.bench_with_input(BenchmarkId::from_parameter(n_refs), &index, |b, index| {
            b.iter(|| black_box(index.best_overlap(&sketches[0])));
        });
    }
    group.finish();
}

fn bench_gather(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather");
    group.sample_size(20);
    for n_components in [5, 20] {
        let (index, sketches) = build_index(200, 500);
        // Query = union of several indexed references.
        let mut query = ScaledSketch::new(SCALED);
        for s in sketches.iter().take(n_components) {
            for &h in s.hashes() {
                query.insert(h);
            }
        }
        group.bench_with_input(
            BenchmarkId::from_parameter(n_components),
            &query,
            |b, query| {
                b.iter(|| black_box(index.gather(query).run().len()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_add_reference, bench_best_overlap, bench_gather);
criterion_main!(benches);

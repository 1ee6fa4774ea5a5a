//! Benchmarks for the availability evaluators.
//!
//! The workload is a series of `m` stages, each made of two redundant
//! components. It has `2^m` paths and `m` minimal cuts, which makes it a
//! good stress case for inclusion-exclusion over paths.
//!
//! Run with:
//! ```bash
//! cargo bench --bench sdp
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use rbd_rs::probability::ProbabilityMap;
use rbd_rs::types::{ComponentId, MinCutSets, NodePair, PathSets};
use rbd_rs::{mcs, pathset, sdp};

/// Paths and cuts of `stages` series stages of two parallel components.
fn staged_network(stages: i32) -> (PathSets, MinCutSets) {
    let mut paths: PathSets = vec![vec![]];
    for s in 0..stages {
        paths = paths
            .into_iter()
            .flat_map(|p| {
                [2 * s, 2 * s + 1].map(|c| {
                    let mut q = p.clone();
                    q.push(c);
                    q
                })
            })
            .collect();
    }
    let cuts = (0..stages).map(|s| vec![2 * s, 2 * s + 1]).collect();
    (paths, cuts)
}

/// Deterministic probabilities in `[0.8, 1.0)` for components `0..n`.
fn random_probs(seed: u64, n: i32) -> ProbabilityMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let entries: Vec<(ComponentId, f64)> = (0..n).map(|c| (c, rng.random_range(0.8..1.0))).collect();
    ProbabilityMap::new(entries).unwrap()
}

// ============================================================================
// Benchmark: single pair, per method
// ============================================================================

fn bench_single_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("avail/single");

    for stages in [2, 3, 4] {
        let (paths, cuts) = staged_network(stages);
        let probs = random_probs(42, 2 * stages);

        group.bench_with_input(BenchmarkId::new("pathset", stages), &stages, |b, _| {
            b.iter(|| pathset::eval_avail(0, 1, &probs, &paths).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("mcs", stages), &stages, |b, _| {
            b.iter(|| mcs::eval_avail(0, 1, &probs, &cuts).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("sdp", stages), &stages, |b, _| {
            b.iter(|| sdp::eval_avail(0, 1, &probs, &paths).unwrap())
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: SDP serial vs parallel
// ============================================================================

fn bench_sdp_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdp/transform");
    group.sample_size(20);

    for stages in [5, 6, 7] {
        let (paths, _) = staged_network(stages);
        group.throughput(Throughput::Elements(paths.len() as u64));

        group.bench_with_input(BenchmarkId::new("serial", stages), &paths, |b, paths| {
            b.iter(|| sdp::to_sdp_set(0, 1, paths))
        });
        group.bench_with_input(BenchmarkId::new("parallel", stages), &paths, |b, paths| {
            b.iter(|| sdp::to_sdp_set_parallel(0, 1, paths))
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: topology batch
// ============================================================================

fn bench_topo(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdp/topo");
    group.sample_size(20);

    let (paths, _) = staged_network(5);
    let probs = random_probs(7, 10);

    for num_pairs in [16, 64, 256] {
        let pairs: Vec<NodePair> = (0..num_pairs).map(|i| (i, i + 1)).collect();
        let lists: Vec<PathSets> = vec![paths.clone(); num_pairs as usize];
        group.throughput(Throughput::Elements(num_pairs as u64));

        group.bench_with_input(BenchmarkId::new("serial", num_pairs), &num_pairs, |b, _| {
            b.iter(|| sdp::eval_avail_topo(&pairs, &probs, &lists).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", num_pairs), &num_pairs, |b, _| {
            b.iter(|| sdp::eval_avail_topo_parallel(&pairs, &probs, &lists).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_pair, bench_sdp_parallel, bench_topo);
criterion_main!(benches);

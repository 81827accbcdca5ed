//! Benchmark for AdaptiveSequence against fixed storages.
//!
//! Runs bursty workloads that alternate insertion and read phases and
//! compares the adaptive sequence with a sequence pinned to one storage.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use morphseq::adaptive::{AdaptiveConfig, AdaptiveSequence};
use morphseq::storage::{ContiguousArray, LinkedNodeList, Storage};
use std::hint::black_box;

const PHASE: usize = 200;

fn bursty_fixed<S: Storage<Element = usize>>(rounds: usize) -> usize {
    let mut storage = S::default();
    let mut total = 0;
    for round in 0..rounds {
        for value in 0..PHASE {
            storage.prepend(round * PHASE + value).expect("prepend never fails");
        }
        for index in 0..PHASE {
            total += storage.get(index * (round + 1)).copied().unwrap_or(0);
        }
    }
    total
}

fn bursty_adaptive(rounds: usize, config: AdaptiveConfig) -> usize {
    let mut sequence = AdaptiveSequence::with_config(config);
    let mut total = 0;
    for round in 0..rounds {
        for value in 0..PHASE {
            sequence.prepend(round * PHASE + value).expect("prepend never fails");
        }
        for index in 0..PHASE {
            total += sequence.get(index * (round + 1)).copied().unwrap_or(0);
        }
    }
    total
}

// =============================================================================
// bursty workload Benchmark
// =============================================================================

fn benchmark_bursty(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bursty");

    for rounds in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::new("ContiguousArray", rounds), &rounds, |bencher, &rounds| {
            bencher.iter(|| black_box(bursty_fixed::<ContiguousArray<usize>>(rounds)));
        });
        group.bench_with_input(BenchmarkId::new("LinkedNodeList", rounds), &rounds, |bencher, &rounds| {
            bencher.iter(|| black_box(bursty_fixed::<LinkedNodeList<usize>>(rounds)));
        });
        for threshold in [10, 50] {
            let config = AdaptiveConfig::default().with_operation_threshold(threshold);
            group.bench_with_input(
                BenchmarkId::new(format!("AdaptiveSequence_t{threshold}"), rounds),
                &rounds,
                |bencher, &rounds| {
                    bencher.iter(|| black_box(bursty_adaptive(rounds, config)));
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// migration Benchmark
// =============================================================================

fn benchmark_migrate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("migrate");

    for size in [100, 1000, 10000] {
        let mut sequence: AdaptiveSequence<usize> = AdaptiveSequence::from_batch(0..size);
        sequence.optimize_for_random_access().expect("migrate to array");

        group.bench_with_input(BenchmarkId::new("array_to_list", size), &size, |bencher, _| {
            bencher.iter_batched(
                || sequence.clone(),
                |mut sequence| {
                    sequence.optimize_for_insertions().expect("migrate to list");
                    sequence
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_bursty, benchmark_migrate);
criterion_main!(benches);

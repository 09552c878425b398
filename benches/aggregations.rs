//! RSE series and tail aggregation benchmarks
//!
//! Run with: cargo bench --bench aggregations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hll_validate::records::SummaryRecord;
use hll_validate::rse::empirical_rse;
use hll_validate::tail::tail_stats;

const SMALL_SIZE: usize = 1_000; // 1K buckets
const MEDIUM_SIZE: usize = 1_000_000; // 1M buckets

#[allow(clippy::cast_precision_loss)]
fn summary(len: usize) -> Vec<SummaryRecord> {
    (0..len)
        .map(|i| {
            let fraction = (i + 1) as f64 / len as f64;
            SummaryRecord::new(fraction, 1.0e5 * fraction, 800.0 * fraction)
        })
        .collect()
}

/// Benchmark the elementwise sigma/mean pass
fn bench_empirical_rse(c: &mut Criterion) {
    let mut group = c.benchmark_group("empirical_rse");

    for size in [SMALL_SIZE, MEDIUM_SIZE] {
        let data = summary(size);
        group.bench_with_input(BenchmarkId::new("sigma_over_mean", size), &data, |b, data| {
            b.iter(|| empirical_rse(black_box(data)));
        });
    }

    group.finish();
}

/// Benchmark tail window reduction for growing windows
fn bench_tail_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("tail_stats");
    let series = empirical_rse(&summary(MEDIUM_SIZE));

    for k in [5, 1_000, MEDIUM_SIZE] {
        group.bench_with_input(BenchmarkId::new("mean_max", k), &k, |b, &k| {
            b.iter(|| tail_stats(black_box(&series), black_box(k)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_empirical_rse, bench_tail_stats);
criterion_main!(benches);

//! Benchmarks for series generation.

use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockdash_core::{DashboardContext, Timeframe};
use stockdash_synth::{build_indices, build_prediction, default_indices, resolve, walk_bars};

fn benchmark_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let now = DateTime::parse_from_rfc3339("2025-01-15T14:00:00-05:00").unwrap();

    for tf in Timeframe::all() {
        let plan = resolve(*tf, now).unwrap();
        group.bench_with_input(BenchmarkId::new("bars", tf), &plan, |b, plan| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| walk_bars(black_box(246.81), plan, &mut rng))
        });
    }

    group.finish();
}

fn benchmark_builders(c: &mut Criterion) {
    let now = DateTime::parse_from_rfc3339("2025-01-15T14:00:00-05:00").unwrap();
    let ctx = DashboardContext::new("AAPL", Timeframe::Intraday, now);
    let specs = default_indices();

    c.bench_function("indices_intraday", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| build_indices(black_box(&ctx), &specs, &mut rng))
    });

    c.bench_function("prediction_intraday", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| build_prediction(black_box(&ctx), Some(242.86), &mut rng))
    });
}

criterion_group!(benches, benchmark_walk, benchmark_builders);
criterion_main!(benches);

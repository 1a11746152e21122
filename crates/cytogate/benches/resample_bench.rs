//! Criterion benchmarks for fixed-count resampling.
//! Hulls come from 10k-event clouds; targets cover densify and decimate paths.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cytogate::api::{convex_hull, draw_event_cloud, resample, CloudCfg, ReplayToken};

fn bench_resample(c: &mut Criterion) {
    let pts = draw_event_cloud(
        CloudCfg {
            n_points: 10_000,
            ..CloudCfg::default()
        },
        ReplayToken { seed: 44, index: 0 },
    );
    let hull = convex_hull(&pts).unwrap();
    let mut group = c.benchmark_group("resample");
    for &target in &[3usize, 10, 20, 50, 100] {
        group.bench_with_input(BenchmarkId::new("to_target", target), &target, |b, &t| {
            b.iter_batched(
                || hull.clone(),
                |ring| {
                    let _out = resample(&ring, t).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resample);
criterion_main!(benches);

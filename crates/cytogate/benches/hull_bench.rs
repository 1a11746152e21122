//! Criterion benchmarks for convex hulls of synthetic event clouds.
//! Focus sizes: n in {1e2, 1e3, 1e4, 1e5} events.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cytogate::api::{convex_hull, draw_event_cloud, CloudCfg, ReplayToken};

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[100usize, 1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("monotone_chain", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    draw_event_cloud(
                        CloudCfg {
                            n_points: n,
                            outlier_frac: 0.01,
                            ..CloudCfg::default()
                        },
                        ReplayToken { seed: 43, index: 0 },
                    )
                },
                |pts| {
                    let _hull = convex_hull(&pts).unwrap();
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);

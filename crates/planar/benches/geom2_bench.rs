//! Criterion benchmarks for rays, point-in-polygon and polygon booleans.
//! Focus sizes: vertex count n in {8, 32, 128}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planar

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use planar::geom2::rand::{draw_star, ReplayToken, StarCfg, VertexCount};
use planar::geom2::{intersect, union, Polygon, Ray};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn star(n: usize, seed: u64) -> Polygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(n),
        ..StarCfg::default()
    };
    draw_star(cfg, ReplayToken { seed, index: 0 })
}

fn random_probes(k: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..k)
        .map(|_| Vector2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0)))
        .collect()
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    for &n in &[8usize, 32, 128] {
        let poly = star(n, 7);
        let probes = random_probes(256, 8);
        group.bench_with_input(BenchmarkId::new("contains_point", n), &n, |b, _| {
            // warm the caches once; the loop measures queries only
            let _ = poly.edge_rays();
            b.iter(|| probes.iter().filter(|p| poly.contains_point(**p)).count())
        });
        group.bench_with_input(BenchmarkId::new("raycast", n), &n, |b, _| {
            b.iter(|| {
                probes
                    .iter()
                    .map(|p| Ray::open(*p, 0.3).polygon_intersections(&poly).len())
                    .sum::<usize>()
            })
        });
        group.bench_with_input(BenchmarkId::new("rebuild_caches", n), &n, |b, _| {
            b.iter_batched(
                || poly.clone(),
                |mut p| {
                    p.translate(Vector2::new(0.5, 0.0));
                    p.edge_rays().len()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_boolean(c: &mut Criterion) {
    let mut group = c.benchmark_group("boolean");
    for &n in &[8usize, 32, 128] {
        let a = star(n, 11);
        let mut b = star(n, 12);
        b.set_position(Vector2::new(3.0, 1.5));
        group.bench_with_input(BenchmarkId::new("union", n), &n, |bench, _| {
            bench.iter(|| union(&a, &b).map(|p| p.vertices().len()))
        });
        group.bench_with_input(BenchmarkId::new("intersect", n), &n, |bench, _| {
            bench.iter(|| intersect(&a, &b).map(|p| p.vertices().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_queries, bench_boolean);
criterion_main!(benches);

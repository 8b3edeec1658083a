//! Criterion benchmarks for the vertex walker against brute-force enumeration.
//! Focus sizes: n in {5, 10, 20, 50}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p polywalk

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polywalk::geom2::rand::{draw_tangent_polygon, ReplayToken, TangentCfg, VertexCount};
use polywalk::geom2::{enumerate_vertices, find_vertices, GeomCfg, Hs2};

fn constraints(n: usize, seed: u64) -> Vec<Hs2> {
    let cfg = TangentCfg {
        vertex_count: VertexCount::Fixed(n),
        ..TangentCfg::default()
    };
    draw_tangent_polygon(cfg, ReplayToken { seed, index: 0 })
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    for &n in &[5usize, 10, 20, 50] {
        group.bench_with_input(BenchmarkId::new("find_vertices", n), &n, |b, &n| {
            b.iter_batched(
                || constraints(n, 43),
                |hs| {
                    let _res = find_vertices(&hs);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("enumerate_vertices", n), &n, |b, &n| {
            b.iter_batched(
                || constraints(n, 44),
                |hs| {
                    let _res = enumerate_vertices(&hs, GeomCfg::default());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ftr_reeb::ftr::{FtrConfig, compute_reeb_graph};
use ftr_reeb::topology::{ScalarField, TriangleMesh};

fn terrain(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn smooth_torus(rows: usize, cols: usize) -> Vec<f64> {
    use std::f64::consts::TAU;
    (0..rows * cols)
        .map(|id| {
            let (r, c) = (id / cols, id % cols);
            let u = TAU * (c as f64 + 0.25) / cols as f64;
            let v = TAU * r as f64 / rows as f64;
            (3.0 + v.cos()) * u.sin()
        })
        .collect()
}

fn bench_ftr(c: &mut Criterion) {
    let mut group = c.benchmark_group("ftr");

    for &side in &[32usize, 64, 128] {
        let mesh = TriangleMesh::grid(side, side).expect("grid");
        let field = ScalarField::for_mesh(&mesh, terrain(side * side, 1)).expect("field");

        for &threads in &[1usize, 4] {
            let cfg = FtrConfig {
                threads: Some(threads),
                check_invariants: false,
                ..FtrConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("random_grid_t{threads}"), side),
                &side,
                |b, _| {
                    b.iter(|| {
                        let g = compute_reeb_graph(&mesh, &field, cfg.clone()).expect("reeb");
                        black_box(g);
                    });
                },
            );
        }

        let torus = TriangleMesh::torus(side, side).expect("torus");
        let height = ScalarField::for_mesh(&torus, smooth_torus(side, side)).expect("field");
        group.bench_with_input(BenchmarkId::new("smooth_torus", side), &side, |b, _| {
            b.iter(|| {
                let g = compute_reeb_graph(&torus, &height, FtrConfig::default()).expect("reeb");
                black_box(g);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ftr);
criterion_main!(benches);

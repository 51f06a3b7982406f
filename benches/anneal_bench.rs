//! Criterion benchmarks for the annealing engine.
//!
//! Measures full Schwefel runs at increasing dimensionality to track pure
//! loop overhead (proposal, acceptance, adaptive update) per iteration.

use adaptive_anneal::params::Params;
use adaptive_anneal::sa::SaEngine;
use adaptive_anneal::schwefel::SchwefelProblem;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_params(max_eval: f64) -> Params {
    Params::from_pairs(&[
        ("initial temperature", 100.0),
        ("initial max change", 250.0),
        ("min xi", -500.0),
        ("max xi", 500.0),
        ("alpha", 0.1),
        ("w", 1.0),
        ("temperature scaling", 0.95),
        ("min accepted at each temperature", 20.0),
        ("max same temperature chain", 100.0),
        ("max iterations", max_eval),
        ("max eval", max_eval),
        ("max temperature steps", 1_000.0),
    ])
}

fn bench_schwefel_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("schwefel_run");

    for dim in [2usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| {
                let mut engine =
                    SaEngine::new(SchwefelProblem::new(dim), bench_params(10_000.0))
                        .expect("valid params")
                        .with_seed(42);
                black_box(engine.optimise())
            });
        });
    }

    group.finish();
}

fn bench_schwefel_with_trajectory(c: &mut Criterion) {
    c.bench_function("schwefel_run_with_trajectory", |b| {
        b.iter(|| {
            let mut engine = SaEngine::new(SchwefelProblem::new(2), bench_params(10_000.0))
                .expect("valid params")
                .with_seed(42)
                .with_trajectory(true);
            black_box(engine.optimise())
        });
    });
}

criterion_group!(benches, bench_schwefel_run, bench_schwefel_with_trajectory);
criterion_main!(benches);

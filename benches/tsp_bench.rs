//! Criterion benchmarks for u-tsp strategies.
//!
//! Uses seeded random instances in a 1000 x 1000 square.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_tsp::construct::NearestNeighbor;
use u_tsp::ga::{GaConfig, GaRunner};
use u_tsp::local::{GuidedTwoOpt, TwoOpt, TwoOptConfig};
use u_tsp::model::{Instance, Point};
use u_tsp::neighbor::NeighborLists;
use u_tsp::random::create_rng;
use u_tsp::sa::{SaConfig, SaRunner};

fn random_instance(n: usize, seed: u64) -> Instance {
    let mut rng = create_rng(Some(seed));
    Instance::new(
        (0..n)
            .map(|i| {
                Point::new(
                    i as u32 + 1,
                    rng.random_range(0..1000) as f64,
                    rng.random_range(0..1000) as f64,
                )
            })
            .collect(),
    )
}

fn bench_nearest_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");
    for &n in &[100, 500, 1000] {
        let instance = random_instance(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| {
                let tour = NearestNeighbor::build(black_box(inst), 0);
                black_box(tour)
            })
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");
    group.sample_size(10);
    let config = TwoOptConfig::default();
    for &n in &[50, 100, 200] {
        let instance = random_instance(n, 42);
        let start = NearestNeighbor::build(&instance, 0).expect("non-empty instance");
        let lists = NeighborLists::build_default(&instance);

        group.bench_with_input(BenchmarkId::new("full", n), &instance, |b, inst| {
            b.iter(|| {
                let result = TwoOpt::run(black_box(inst), start.clone(), &config);
                black_box(result)
            })
        });
        group.bench_with_input(BenchmarkId::new("guided", n), &instance, |b, inst| {
            b.iter(|| {
                let result = GuidedTwoOpt::run(black_box(inst), start.clone(), &lists, &config);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_neighbor_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_lists");
    for &n in &[100, 500] {
        let instance = random_instance(n, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| black_box(NeighborLists::build_default(black_box(inst))))
        });
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);
    for &n in &[20, 50] {
        let instance = random_instance(n, 42);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(50)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(inst), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa");
    group.sample_size(10);
    for &n in &[50, 200] {
        let instance = random_instance(n, 42);
        let config = SaConfig::fast().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = SaRunner::run(black_box(inst), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_nearest_neighbor,
    bench_neighbor_lists,
    bench_two_opt,
    bench_ga,
    bench_sa
);
criterion_main!(benches);

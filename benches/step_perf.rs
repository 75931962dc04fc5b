//! Benchmark: cost of one directed and one randomizing step.
//!
//! Each benchmark rebuilds the simulation before every iteration so it
//! measures an active grid full of unhappy residents, not a settled one.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use schelling::core::config::SimConfig;
use schelling::simulation::Simulation;

fn config(size: usize) -> SimConfig {
    SimConfig {
        size,
        neighborhood_radius: 1,
        vacant_fraction: 0.2,
        red_fraction: 0.5,
        happiness_threshold: 0.7,
        seed: 7,
    }
}

fn bench_directed_step(c: &mut Criterion) {
    c.bench_function("directed_step_64x64", |b| {
        b.iter_batched(
            || Simulation::new(&config(64)).expect("valid config"),
            |mut sim| {
                sim.directed_step();
                black_box(&sim);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_random_step(c: &mut Criterion) {
    c.bench_function("random_step_64x64", |b| {
        b.iter_batched(
            || Simulation::new(&config(64)).expect("valid config"),
            |mut sim| {
                sim.one_time_step();
                black_box(&sim);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_fraction_happy(c: &mut Criterion) {
    c.bench_function("fraction_happy_64x64", |b| {
        let sim = Simulation::new(&config(64)).expect("valid config");
        b.iter(|| black_box(sim.fraction_happy()));
    });
}

criterion_group!(
    benches,
    bench_directed_step,
    bench_random_step,
    bench_fraction_happy,
);
criterion_main!(benches);

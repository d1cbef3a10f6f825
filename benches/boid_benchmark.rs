/*
 * Boid Simulation Benchmark
 *
 * Measures the neighbor searches, the steering rules and the full tick
 * at a few population sizes, so the brute force scan can be compared with
 * the spatial grid.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use boids::{
    neighbors, steering, Boid, BruteForce, Flock, NeighborSearch, NeighborSearchKind,
    SimulationParams, SpatialGrid,
};

fn random_boids(n: usize, params: &SimulationParams) -> Vec<Boid> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..n).map(|_| Boid::random(&mut rng, params)).collect()
}

// Dense enough that every boid has a handful of neighbors
fn bench_params() -> SimulationParams {
    SimulationParams {
        width: 1600.0,
        height: 1200.0,
        seed: Some(1),
        ..SimulationParams::default()
    }
}

// Benchmark the neighbor searches
fn bench_neighbor_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_search");
    let params = bench_params();

    for num_boids in [100, 500, 1000, 2000].iter() {
        let boids = random_boids(*num_boids, &params);

        group.bench_with_input(BenchmarkId::new("brute_force", num_boids), &boids, |b, boids| {
            let search = BruteForce;
            let mut out = Vec::new();
            b.iter(|| {
                for i in 0..boids.len() {
                    search.neighbors_within(boids, i, params.perception_radius, &mut out);
                    black_box(&out);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("spatial_grid", num_boids), &boids, |b, boids| {
            let mut grid = SpatialGrid::new(params.cell_size(), params.width, params.height);
            let mut out = Vec::new();
            b.iter(|| {
                grid.rebuild(boids);
                for i in 0..boids.len() {
                    grid.neighbors_within(boids, i, params.perception_radius, &mut out);
                    black_box(&out);
                }
            });
        });
    }

    group.finish();
}

// Benchmark the steering rules given precomputed neighbor lists
fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");
    let params = bench_params();

    for num_boids in [100, 500, 1000, 2000].iter() {
        let boids = random_boids(*num_boids, &params);
        let lists: Vec<Vec<usize>> = (0..boids.len())
            .map(|i| neighbors::neighbors(&boids, i, params.perception_radius))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &boids, |b, boids| {
            b.iter(|| {
                for (i, list) in lists.iter().enumerate() {
                    let near = list.iter().map(|&j| &boids[j]);
                    let steer = steering::steer(&boids[i], near.clone(), near, None, &params);
                    black_box(steer.combined(&params));
                }
            });
        });
    }

    group.finish();
}

// Benchmark the full tick
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_boids in [100, 500, 1000, 2000].iter() {
        for kind in [NeighborSearchKind::BruteForce, NeighborSearchKind::Grid] {
            let params = SimulationParams {
                num_boids: *num_boids,
                neighbor_search: kind,
                ..bench_params()
            };
            let Ok(mut flock) = Flock::new(params) else {
                continue;
            };

            group.bench_function(BenchmarkId::new(format!("{kind:?}"), num_boids), |b| {
                b.iter(|| flock.tick(None));
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_neighbor_search, bench_steering, bench_tick
}

criterion_main!(benches);

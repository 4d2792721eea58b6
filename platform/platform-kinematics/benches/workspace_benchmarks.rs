//! Benchmarks for the solver and the workspace sweep.
//!
//! Run with: cargo bench -p platform-kinematics
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p platform-kinematics -- --save-baseline main
//! 2. After changes: cargo bench -p platform-kinematics -- --baseline main

#![allow(missing_docs, clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use platform_kinematics::{
    GridBounds, ValidationParams, WorkspaceParams, WorkspaceSampler, sample_workspace, solve,
    validate_solution,
};
use platform_types::{Configuration, GeometryParams, LegLimits, Point3, Pose, Topology};

fn config(topology: Topology) -> Configuration {
    let params = GeometryParams::default()
        .base_radius(120.0)
        .platform_radius(70.0)
        .nominal_leg_length(150.0)
        .limits(LegLimits::new(140.0, 220.0));
    Configuration::new(topology, &params).unwrap()
}

fn sweep_params(step: f64) -> WorkspaceParams {
    WorkspaceParams::default()
        .with_bounds(GridBounds::new(
            Point3::new(-100.0, -100.0, 110.0),
            Point3::new(100.0, 100.0, 230.0),
        ))
        .with_step(step)
}

// =============================================================================
// Single-pose Benchmarks
// =============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solve");
    let pose = Pose::new(5.0, -3.0, 165.0, 4.0, -2.0, 6.0).unwrap();

    for topology in Topology::ALL {
        let config = config(topology);
        let id = BenchmarkId::new("solve_and_validate", topology);
        group.bench_with_input(id, &config, |b, config| {
            let params = ValidationParams::default();
            b.iter(|| {
                let solution = solve(black_box(config), black_box(&pose));
                validate_solution(config, &solution, &params)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Workspace Benchmarks
// =============================================================================

fn bench_workspace(c: &mut Criterion) {
    let mut group = c.benchmark_group("Workspace");
    group.sample_size(20);

    let config = config(Topology::SixThree);
    for step in [10.0, 5.0] {
        let params = sweep_params(step);
        group.throughput(Throughput::Elements(params.point_count() as u64));

        group.bench_with_input(BenchmarkId::new("parallel", step), &params, |b, params| {
            b.iter(|| sample_workspace(black_box(&config), &Pose::home(), params).unwrap());
        });

        let sequential = params.clone().with_parallel(false);
        group.bench_with_input(BenchmarkId::new("sequential", step), &sequential, |b, params| {
            b.iter(|| sample_workspace(black_box(&config), &Pose::home(), params).unwrap());
        });
    }

    // Translation-only changes hit the cache.
    let mut sampler =
        WorkspaceSampler::new(config, sweep_params(5.0), ValidationParams::default()).unwrap();
    sampler.sample(&Pose::home());
    let moved = Pose::new(10.0, 10.0, 170.0, 0.0, 0.0, 0.0).unwrap();
    group.bench_function("recolor_cached", |b| {
        b.iter(|| sampler.recolor(black_box(&moved)));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_solve, bench_workspace);
criterion_main!(benches);

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Engine Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the field engine hot path.
//!
//! Covers:
//!   - Full tick (step) at the default and a 4× population
//!   - Snapshot projection with a dense edge list
//!   - Kernel force and pairwise distances
//!   - Neighbor search
//!   - Grid field chain (density → potential → force)
//!
//! A warmed tick at the default population must fit comfortably inside
//! the 33 ms frame interval.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use dynamath_engine::{BruteForceNeighbors, FieldEngine, NeighborSearch};
use dynamath_physics::params::FORCE_FLOOR;
use dynamath_physics::{distance_matrix, field_force_on_grid, kernel_force};

const N_DEFAULT: usize = 12;
const N_LARGE: usize = 48;

// ── Helpers ───────────────────────────────────────────────────────────

fn make_engine(n: usize) -> FieldEngine {
    let mut engine = FieldEngine::create(n, 7).unwrap();
    engine.apply_sensor(&json!({"motion": 0.4, "brightness": 0.6, "hue": 1.1, "rgb": [0.2, 0.5, 0.8]}));
    engine
}

fn make_points(n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.37;
            [1.2 + 0.2 * t.sin(), 0.6 + 0.2 * t.cos()]
        })
        .collect()
}

// ── Tick benchmarks ──────────────────────────────────────────────────

fn bench_step_default(c: &mut Criterion) {
    let mut engine = make_engine(N_DEFAULT);
    c.bench_function("step_12", |b| b.iter(|| engine.step()));
}

fn bench_step_large(c: &mut Criterion) {
    let mut engine = make_engine(N_LARGE);
    c.bench_function("step_48", |b| b.iter(|| engine.step()));
}

fn bench_tick_frame_warmed(c: &mut Criterion) {
    let mut engine = make_engine(N_DEFAULT);
    engine.run(30);
    c.bench_function("DEADLINE_tick_frame_12_warmed", |b| {
        b.iter(|| engine.tick())
    });
}

// ── Projection benchmarks ────────────────────────────────────────────

fn bench_snapshot_all_edges(c: &mut Criterion) {
    let mut engine = make_engine(N_LARGE);
    engine.apply_parameters(&json!({"edge_threshold": 0.0}));
    engine.run(5);
    c.bench_function("snapshot_48_all_edges", |b| {
        b.iter(|| black_box(&engine).snapshot())
    });
}

// ── Geometry benchmarks ──────────────────────────────────────────────

fn bench_kernel_force(c: &mut Criterion) {
    let points = make_points(N_LARGE);
    c.bench_function("kernel_force_48", |b| {
        b.iter(|| kernel_force(black_box(&points), 0.05, FORCE_FLOOR))
    });
}

fn bench_distance_matrix(c: &mut Criterion) {
    let points = make_points(N_LARGE);
    c.bench_function("distance_matrix_48", |b| {
        b.iter(|| distance_matrix(black_box(&points)))
    });
}

fn bench_neighbors(c: &mut Criterion) {
    let points = make_points(N_LARGE);
    let d = distance_matrix(&points);
    c.bench_function("brute_force_knn_48_k3", |b| {
        b.iter(|| BruteForceNeighbors.neighbors(black_box(&points), black_box(&d), 3))
    });
}

fn bench_field_on_grid(c: &mut Criterion) {
    let points = make_points(N_DEFAULT);
    c.bench_function("field_force_on_grid_32x32", |b| {
        b.iter(|| {
            field_force_on_grid(
                black_box(&points),
                (0.0, 2.4),
                (0.0, 1.2),
                (32, 32),
                0.05,
                0.2,
            )
        })
    });
}

// ── Groups ───────────────────────────────────────────────────────────

criterion_group!(
    tick,
    bench_step_default,
    bench_step_large,
    bench_tick_frame_warmed,
);

criterion_group!(projection, bench_snapshot_all_edges);

criterion_group!(
    geometry,
    bench_kernel_force,
    bench_distance_matrix,
    bench_neighbors,
    bench_field_on_grid,
);

criterion_main!(tick, projection, geometry);

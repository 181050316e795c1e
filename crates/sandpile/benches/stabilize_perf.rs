//! Benchmark: cost of relaxing piles of various sizes.
//!
//! Each benchmark uses `iter_batched` to rebuild the unstable pile before
//! every iteration so we measure the cascade, not a settled grid.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sandpile::{SandpileGrid, Universe};

/// Already stable grid: cost of an empty worklist check.
fn bench_stabilize_settled(c: &mut Criterion) {
    c.bench_function("stabilize_settled_101x101", |b| {
        let mut grid = SandpileGrid::default();
        b.iter(|| {
            black_box(grid.stabilize());
        });
    });
}

/// One large deposit in the centre, relaxed in a single call.
fn bench_stabilize_center_pile(c: &mut Criterion) {
    c.bench_function("stabilize_center_10k_101x101", |b| {
        b.iter_batched(
            || {
                let mut grid = SandpileGrid::default();
                let center = grid.center();
                grid.add_grains(center, 10_000).unwrap();
                grid
            },
            |mut grid| {
                black_box(grid.stabilize());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Every cell starts at capacity: cascade reaches all four edges.
fn bench_stabilize_saturated(c: &mut Criterion) {
    c.bench_function("stabilize_saturated_64x64", |b| {
        b.iter_batched(
            || {
                let mut grid = SandpileGrid::with_dimensions(64, 64).unwrap();
                for y in 0..64 {
                    for x in 0..64 {
                        grid.add_grains((x, y).into(), 4).unwrap();
                    }
                }
                grid
            },
            |mut grid| {
                black_box(grid.stabilize());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Frame-by-frame drip the way the browser drives it.
fn bench_universe_ticks(c: &mut Criterion) {
    c.bench_function("universe_1000_ticks_101x101", |b| {
        b.iter_batched(
            || Universe::from_grid(SandpileGrid::default()),
            |mut universe| {
                for _ in 0..1000 {
                    universe.tick();
                }
                black_box(&universe);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_stabilize_settled,
    bench_stabilize_center_pile,
    bench_stabilize_saturated,
    bench_universe_ticks,
);
criterion_main!(benches);

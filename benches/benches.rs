use criterion::{criterion_group, criterion_main, Criterion};

use arcane_pathfinding::prelude::*;

fn maze(width: u32, height: u32) -> GridMap {
    let mut grid = GridMap::new(width, height);

    // Vertical walls every fourth column with a gap alternating top and bottom.
    for x in (3..width as i32).step_by(4) {
        let gap = if (x / 4) % 2 == 0 { 0 } else { height as i32 - 1 };
        for y in 0..height as i32 {
            if y != gap {
                grid.set_nav(IVec2::new(x, y), Nav::Impassable);
            }
        }
    }

    grid
}

fn benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinding");
    group.sample_size(10);

    let grid = GridMap::new(64, 64);
    let options = PathOptions::default();

    group.bench_function("find_path_64x64", |b| {
        b.iter(|| find_path(&grid, IVec2::new(0, 0), IVec2::new(63, 63), &options))
    });

    let options = PathOptions::new().diagonal().heuristic(Heuristic::Euclidean);

    group.bench_function("find_path_64x64_diagonal", |b| {
        b.iter(|| find_path(&grid, IVec2::new(0, 0), IVec2::new(63, 63), &options))
    });

    let grid = maze(128, 128);
    let options = PathOptions::new().max_iterations(usize::MAX);

    group.bench_function("find_path_maze_128x128", |b| {
        b.iter(|| find_path(&grid, IVec2::new(0, 0), IVec2::new(127, 127), &options))
    });

    let requests: Vec<(IVec2, IVec2)> = (0..64)
        .map(|i| (IVec2::new(0, i), IVec2::new(127, 127 - i)))
        .collect();

    group.bench_function("find_paths_maze_128x128_x64", |b| {
        b.iter(|| find_paths(&grid, &requests, &options))
    });

    let hex_grid = FnHexGrid::new(|hex: HexCoord| hex.distance(HexCoord::ZERO) <= 32);
    let hex_options = HexPathOptions::default();

    group.bench_function("find_hex_path_radius_32", |b| {
        b.iter(|| {
            find_hex_path(
                &hex_grid,
                HexCoord::new(-32, 0),
                HexCoord::new(32, 0),
                &hex_options,
            )
        })
    });

    group.bench_function("hex_reachable_movement_12", |b| {
        b.iter(|| hex_reachable(&hex_grid, HexCoord::ZERO, 12.0))
    });

    group.finish();
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);

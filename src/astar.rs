//! A* search over square grids.
use bevy::{log, math::IVec2};
use indexmap::map::Entry::{Occupied, Vacant};
use std::collections::BinaryHeap;

use crate::{
    grid::PathGrid,
    macros::timed,
    neighbor::{CardinalNeighborhood, NeighborBuf, Neighborhood, OrdinalNeighborhood},
    path::GridPathResult,
    reconstruct_path, FxIndexMap, Heuristic, MovementCost, PathOptions, SmallestCostHolder,
};

/// Finds the cheapest path from `start` to `goal` on a square grid.
///
/// The returned path includes both endpoints. The search never fails loudly:
/// out of bounds or unwalkable endpoints, a disconnected goal and running out
/// of [`PathOptions::max_iterations`] all produce a result with
/// [`GridPathResult::found`] set to false.
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let grid = GridMap::new(10, 10);
/// let options = PathOptions::new().diagonal().heuristic(Heuristic::Euclidean);
/// let result = find_path(&grid, IVec2::new(0, 0), IVec2::new(9, 9), &options);
///
/// assert!(result.found());
/// assert_eq!(result.len(), 10);
/// assert!((result.cost() - 9.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
/// ```
pub fn find_path<G: PathGrid + ?Sized>(
    grid: &G,
    start: IVec2,
    goal: IVec2,
    options: &PathOptions,
) -> GridPathResult {
    if start == goal {
        return GridPathResult::reached(vec![start], 0.0, 0);
    }

    if !grid.in_bounds(start) {
        log::warn!("Start is out of bounds: {:?}", start);
        return GridPathResult::unreached(0);
    }

    if !grid.in_bounds(goal) {
        log::warn!("Goal is out of bounds: {:?}", goal);
        return GridPathResult::unreached(0);
    }

    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        log::debug!("Start {:?} or goal {:?} is not walkable", start, goal);
        return GridPathResult::unreached(0);
    }

    timed!("find_path", {
        if options.diagonal {
            astar_grid(
                &OrdinalNeighborhood,
                grid,
                start,
                goal,
                options.heuristic,
                options.max_iterations,
            )
        } else {
            astar_grid(
                &CardinalNeighborhood,
                grid,
                start,
                goal,
                options.heuristic,
                options.max_iterations,
            )
        }
    })
}

/// Returns true if `goal` can be reached from `start`.
/// Used to validate that generated levels are connected.
pub fn is_reachable<G: PathGrid + ?Sized>(
    grid: &G,
    start: IVec2,
    goal: IVec2,
    options: &PathOptions,
) -> bool {
    find_path(grid, start, goal, options).found()
}

/// A* search algorithm for a [`PathGrid`].
///
/// # Arguments
/// * `neighborhood` - Reference to the [`Neighborhood`] to use.
/// * `grid` - The grid to search. Endpoints are expected to be in bounds and walkable.
/// * `start` - The starting position in the grid.
/// * `goal` - The goal position in the grid.
/// * `heuristic` - The distance estimate used to order the open set.
/// * `max_iterations` - The maximum number of nodes to expand before giving up.
pub(crate) fn astar_grid<N: Neighborhood, G: PathGrid + ?Sized>(
    neighborhood: &N,
    grid: &G,
    start: IVec2,
    goal: IVec2,
    heuristic: Heuristic,
    max_iterations: usize,
) -> GridPathResult {
    let size_hint = (grid.width() as usize * grid.height() as usize).min(1024);
    let mut to_visit = BinaryHeap::with_capacity(size_hint / 2);
    let mut sequence = 0;
    to_visit.push(SmallestCostHolder {
        estimated_cost: heuristic.distance(start, goal),
        cost: 0.0,
        index: 0,
        sequence,
    });

    // position -> (parent index, best cost, closed)
    let mut visited: FxIndexMap<IVec2, (usize, MovementCost, bool)> = FxIndexMap::default();
    visited.insert(start, (usize::MAX, 0.0, false));

    let mut neighbors = NeighborBuf::new();
    let mut iterations = 0;

    while let Some(SmallestCostHolder { cost, index, .. }) = to_visit.pop() {
        let current_pos = {
            let Some((pos, entry)) = visited.get_index_mut(index) else {
                continue;
            };

            if entry.2 || cost > entry.1 {
                continue;
            }

            entry.2 = true;
            *pos
        };

        if iterations >= max_iterations {
            log::warn!(
                "Gave up on path from {:?} to {:?} after {} iterations",
                start,
                goal,
                iterations
            );
            return GridPathResult::unreached(iterations);
        }
        iterations += 1;

        if current_pos == goal {
            return GridPathResult::reached(reconstruct_path(&visited, index), cost, iterations);
        }

        neighbors.clear();
        neighborhood.neighbors(grid, current_pos, &mut neighbors);

        for &(neighbor, step_cost) in neighbors.iter() {
            let new_cost = cost + step_cost;
            let n;
            match visited.entry(neighbor) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((index, new_cost, false));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        n = e.index();
                        e.insert((index, new_cost, false));
                    } else {
                        continue;
                    }
                }
            }

            sequence += 1;
            to_visit.push(SmallestCostHolder {
                estimated_cost: new_cost + heuristic.distance(neighbor, goal),
                cost: new_cost,
                index: n,
                sequence,
            });
        }
    }

    log::debug!("No path from {:?} to {:?}", start, goal);
    GridPathResult::unreached(iterations)
}

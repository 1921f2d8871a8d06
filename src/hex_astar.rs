//! A* search over hex grids.
use bevy::log;
use indexmap::map::Entry::{Occupied, Vacant};
use std::collections::BinaryHeap;

use crate::{
    hex::{HexCoord, HexPathGrid},
    macros::timed,
    path::HexPathResult,
    reconstruct_path, FxIndexMap, HexPathOptions, MovementCost, SmallestCostHolder,
};

/// Finds the cheapest path from `start` to `goal` on a hex grid.
///
/// Works like [`crate::find_path`] over the six hex directions, using hex
/// distance as the heuristic. Unwalkable endpoints, a disconnected goal and
/// running out of [`HexPathOptions::max_iterations`] produce a result with
/// [`HexPathResult::found`] set to false.
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let grid = FnHexGrid::new(|hex: HexCoord| hex.distance(HexCoord::ZERO) <= 4);
/// let result = find_hex_path(
///     &grid,
///     HexCoord::new(-2, 0),
///     HexCoord::new(2, 0),
///     &HexPathOptions::default(),
/// );
///
/// assert!(result.found());
/// assert_eq!(result.cost(), 4.0);
/// ```
pub fn find_hex_path<G: HexPathGrid + ?Sized>(
    grid: &G,
    start: HexCoord,
    goal: HexCoord,
    options: &HexPathOptions,
) -> HexPathResult {
    debug_assert!(start.is_valid(), "start {start} is not a valid cube coordinate");
    debug_assert!(goal.is_valid(), "goal {goal} is not a valid cube coordinate");

    if start == goal {
        return HexPathResult::reached(vec![start], 0.0, 0);
    }

    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        log::debug!("Start {} or goal {} is not walkable", start, goal);
        return HexPathResult::unreached(0);
    }

    timed!("find_hex_path", {
        astar_hex(grid, start, goal, options.max_iterations)
    })
}

#[inline(always)]
fn heuristic(pos: HexCoord, goal: HexCoord) -> MovementCost {
    pos.distance(goal) as MovementCost
}

/// A* search algorithm for a [`HexPathGrid`]. Endpoints are expected to be walkable.
pub(crate) fn astar_hex<G: HexPathGrid + ?Sized>(
    grid: &G,
    start: HexCoord,
    goal: HexCoord,
    max_iterations: usize,
) -> HexPathResult {
    let mut to_visit = BinaryHeap::new();
    let mut sequence = 0;
    to_visit.push(SmallestCostHolder {
        estimated_cost: heuristic(start, goal),
        cost: 0.0,
        index: 0,
        sequence,
    });

    // hex -> (parent index, best cost, closed)
    let mut visited: FxIndexMap<HexCoord, (usize, MovementCost, bool)> = FxIndexMap::default();
    visited.insert(start, (usize::MAX, 0.0, false));

    let mut iterations = 0;

    while let Some(SmallestCostHolder { cost, index, .. }) = to_visit.pop() {
        let current = {
            let Some((hex, entry)) = visited.get_index_mut(index) else {
                continue;
            };

            if entry.2 || cost > entry.1 {
                continue;
            }

            entry.2 = true;
            *hex
        };

        if iterations >= max_iterations {
            log::warn!(
                "Gave up on hex path from {} to {} after {} iterations",
                start,
                goal,
                iterations
            );
            return HexPathResult::unreached(iterations);
        }
        iterations += 1;

        if current == goal {
            return HexPathResult::reached(reconstruct_path(&visited, index), cost, iterations);
        }

        for neighbor in current.neighbors() {
            if !grid.is_walkable(neighbor) {
                continue;
            }

            let step_cost = grid.cost(neighbor);
            debug_assert!(
                step_cost > 0.0,
                "walkable hex {neighbor} has non-positive cost {step_cost}"
            );

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
                estimated_cost: new_cost + heuristic(neighbor, goal),
                cost: new_cost,
                index: n,
                sequence,
            });
        }
    }

    log::debug!("No hex path from {} to {}", start, goal);
    HexPathResult::unreached(iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::FnHexGrid;
    use bevy::platform::collections::HashSet;

    fn disc(radius: i32) -> impl Fn(HexCoord) -> bool {
        move |hex: HexCoord| hex.distance(HexCoord::ZERO) <= radius
    }

    #[test]
    fn test_trivial_path() {
        let grid = FnHexGrid::new(disc(2));
        let hex = HexCoord::new(1, -1);

        let result = find_hex_path(&grid, hex, hex, &HexPathOptions::default());

        assert!(result.found());
        assert_eq!(result.path(), &[hex]);
        assert_eq!(result.cost(), 0.0);
        assert_eq!(result.explored(), 0);
    }

    #[test]
    fn test_open_grid_cost_is_distance() {
        let grid = FnHexGrid::new(disc(6));
        let start = HexCoord::new(-3, 1);

        for goal in HexCoord::ZERO.range(5) {
            let result = find_hex_path(&grid, start, goal, &HexPathOptions::default());

            assert!(result.found());
            assert_eq!(result.cost(), start.distance(goal) as f32);
            assert_eq!(result.len(), start.distance(goal) as usize + 1);
            assert_eq!(result.path()[0], start);
            assert_eq!(result.goal(), Some(goal));
        }
    }

    #[test]
    fn test_path_coordinates_are_valid_and_adjacent() {
        let walls: HashSet<HexCoord> = [
            HexCoord::new(0, -1),
            HexCoord::new(0, 0),
            HexCoord::new(0, 1),
            HexCoord::new(0, 2),
        ]
        .into_iter()
        .collect();
        let grid = FnHexGrid::new(|hex: HexCoord| disc(4)(hex) && !walls.contains(&hex));

        let result = find_hex_path(
            &grid,
            HexCoord::new(-2, 1),
            HexCoord::new(2, -1),
            &HexPathOptions::default(),
        );

        assert!(result.found());
        assert!(result.cost() > 4.0);
        for hex in result.path() {
            assert!(hex.is_valid());
            assert!(!walls.contains(hex));
        }
        for pair in result.path().windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1);
        }
    }

    #[test]
    fn test_weighted_detour() {
        // A ridge of expensive hexes between start and goal.
        let grid = FnHexGrid::new(disc(3)).with_cost(|hex: HexCoord| {
            if hex.q == 0 && hex.r.abs() <= 1 {
                10.0
            } else {
                1.0
            }
        });

        let result = find_hex_path(
            &grid,
            HexCoord::new(-1, 0),
            HexCoord::new(1, 0),
            &HexPathOptions::default(),
        );

        assert!(result.found());
        assert!(result.cost() < 10.0);
        assert!(result.path().iter().all(|hex| hex.q != 0 || hex.r.abs() > 1));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_non_positive_cost_panics() {
        let grid = FnHexGrid::new(disc(2)).with_cost(|_| -1.0);
        let _ = find_hex_path(
            &grid,
            HexCoord::ZERO,
            HexCoord::new(2, 0),
            &HexPathOptions::default(),
        );
    }

    #[test]
    fn test_surrounded_goal() {
        let goal = HexCoord::new(1, 1);
        let ring: HashSet<HexCoord> = goal.neighbors().into_iter().collect();
        let grid = FnHexGrid::new(|hex: HexCoord| disc(5)(hex) && !ring.contains(&hex));

        let result = find_hex_path(&grid, HexCoord::new(-3, 0), goal, &HexPathOptions::default());

        assert!(!result.found());
        assert!(result.path().is_empty());
        assert_eq!(result.cost(), 0.0);
        assert!(result.explored() > 0);
    }

    #[test]
    fn test_unwalkable_endpoints() {
        let grid = FnHexGrid::new(disc(2));
        let options = HexPathOptions::default();

        let result = find_hex_path(&grid, HexCoord::new(5, 0), HexCoord::ZERO, &options);
        assert!(!result.found());
        assert_eq!(result.explored(), 0);

        let result = find_hex_path(&grid, HexCoord::ZERO, HexCoord::new(0, 3), &options);
        assert!(!result.found());
        assert_eq!(result.explored(), 0);
    }

    #[test]
    fn test_iteration_cap() {
        let grid = FnHexGrid::new(disc(5));

        let result = find_hex_path(
            &grid,
            HexCoord::new(-3, 0),
            HexCoord::new(3, 0),
            &HexPathOptions::new().max_iterations(1),
        );

        assert!(!result.found());
        assert_eq!(result.explored(), 1);
    }

    #[test]
    fn test_unbounded_grid_hits_cap() {
        // Everything is walkable except the goal's neighbors, so only the cap stops the search.
        let goal = HexCoord::new(2, 0);
        let ring: HashSet<HexCoord> = goal.neighbors().into_iter().collect();
        let grid = FnHexGrid::new(|hex: HexCoord| !ring.contains(&hex));

        let result = find_hex_path(
            &grid,
            HexCoord::ZERO,
            goal,
            &HexPathOptions::new().max_iterations(500),
        );

        assert!(!result.found());
        assert_eq!(result.explored(), 500);
    }

    #[test]
    fn test_deterministic() {
        let grid = FnHexGrid::new(disc(6));
        let options = HexPathOptions::default();

        let first = find_hex_path(&grid, HexCoord::new(-4, 1), HexCoord::new(3, 2), &options);
        let second = find_hex_path(&grid, HexCoord::new(-4, 1), HexCoord::new(3, 2), &options);

        assert_eq!(first, second);
    }
}

//! Grid pathfinding for the Arcane engine.
//!
//! Two independent searches live here:
//!
//! - **Square grids**: [`find_path`] runs A* over an orthogonal [`PathGrid`],
//!   4- or 8-directional, with a selectable [`Heuristic`].
//! - **Hex grids**: [`find_hex_path`] runs A* over cube coordinates and
//!   [`hex_reachable`] flood-fills everything within a movement budget.
//!
//! Failure to find a route is a normal outcome and is reported through
//! [`PathResult::found`], never as an error.
use std::cmp::Ordering;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

mod astar;
mod batch;
mod error;
pub mod grid;
mod heuristic;
pub mod hex;
mod hex_astar;
mod macros;
mod neighbor;
mod options;
pub mod path;
mod reachable;

pub use astar::{find_path, is_reachable};
pub use batch::find_paths;
pub use error::PathError;
pub use heuristic::Heuristic;
pub use hex_astar::find_hex_path;
pub use options::{HexPathOptions, PathOptions};
pub use path::{GridPathResult, HexPathResult, PathResult};
pub use reachable::{hex_reachable, reachable_to_array, HexReachable};

pub mod prelude {
    pub use crate::grid::{Blocked, FnGrid, GridMap, Nav, PathGrid};
    pub use crate::hex::{FnHexGrid, HexCoord, HexDirection, HexKey, HexPathGrid};
    pub use crate::path::{GridPathResult, HexPathResult, PathResult};
    pub use crate::{
        find_hex_path, find_path, find_paths, hex_reachable, is_reachable, reachable_to_array,
        Heuristic, HexPathOptions, HexReachable, PathError, PathOptions,
    };
    pub use bevy::math::IVec2;
}

/// Movement cost of a single step or a whole path.
pub type MovementCost = f32;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Open set entry. Ordered so that `BinaryHeap` pops the lowest estimated cost first,
/// preferring the deeper node and then the earlier insertion on ties.
pub(crate) struct SmallestCostHolder {
    pub(crate) estimated_cost: MovementCost,
    pub(crate) cost: MovementCost,
    pub(crate) index: usize,
    pub(crate) sequence: usize,
}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SmallestCostHolder {}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.total_cmp(&other.cost) {
                Ordering::Equal => other.sequence.cmp(&self.sequence),
                s => s,
            },
            s => s,
        }
    }
}

/// Walks parent indices back from `index` and returns the positions start first.
pub(crate) fn reconstruct_path<P: Copy>(
    visited: &FxIndexMap<P, (usize, MovementCost, bool)>,
    index: usize,
) -> Vec<P> {
    let mut steps = vec![];
    let mut current = index;

    while current != usize::MAX {
        let Some((pos, &(parent, _, _))) = visited.get_index(current) else {
            break;
        };
        steps.push(*pos);
        current = parent;
    }

    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn holder(f: f32, g: f32, sequence: usize) -> SmallestCostHolder {
        SmallestCostHolder {
            estimated_cost: f,
            cost: g,
            index: sequence,
            sequence,
        }
    }

    #[test]
    fn test_heap_pops_lowest_estimate() {
        let mut heap = BinaryHeap::new();
        heap.push(holder(5.0, 1.0, 0));
        heap.push(holder(2.0, 1.0, 1));
        heap.push(holder(3.5, 1.0, 2));

        assert_eq!(heap.pop().unwrap().estimated_cost, 2.0);
        assert_eq!(heap.pop().unwrap().estimated_cost, 3.5);
        assert_eq!(heap.pop().unwrap().estimated_cost, 5.0);
    }

    #[test]
    fn test_heap_tie_break() {
        let mut heap = BinaryHeap::new();
        heap.push(holder(4.0, 1.0, 0));
        heap.push(holder(4.0, 3.0, 1));
        heap.push(holder(4.0, 1.0, 2));

        // Deeper node first, then insertion order.
        assert_eq!(heap.pop().unwrap().index, 1);
        assert_eq!(heap.pop().unwrap().index, 0);
        assert_eq!(heap.pop().unwrap().index, 2);
    }

    #[test]
    fn test_reconstruct_path() {
        let mut visited: FxIndexMap<(i32, i32), (usize, MovementCost, bool)> =
            FxIndexMap::default();
        visited.insert((0, 0), (usize::MAX, 0.0, true));
        visited.insert((1, 0), (0, 1.0, true));
        visited.insert((9, 9), (0, 1.0, false));
        visited.insert((2, 0), (1, 2.0, true));

        assert_eq!(
            reconstruct_path(&visited, 3),
            vec![(0, 0), (1, 0), (2, 0)]
        );
        assert_eq!(reconstruct_path(&visited, 0), vec![(0, 0)]);
    }
}

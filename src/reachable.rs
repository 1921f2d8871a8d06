//! Movement range flood fill over hex grids.
use bevy::log;
use indexmap::map::Entry::{Occupied, Vacant};
use std::collections::VecDeque;

use crate::{
    hex::{HexCoord, HexKey, HexPathGrid},
    macros::timed,
    FxIndexMap, MovementCost,
};

/// Every hex reachable within a movement budget, mapped to the budget left on arrival.
///
/// Keys are kept in the order the flood fill first discovered them, starting
/// with the start hex.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexReachable {
    remaining: FxIndexMap<HexKey, MovementCost>,
}

impl HexReachable {
    /// Budget left after moving to `hex`, `None` if it can't be reached.
    pub fn get(&self, hex: HexCoord) -> Option<MovementCost> {
        self.remaining.get(&hex.key()).copied()
    }

    pub fn contains(&self, hex: HexCoord) -> bool {
        self.remaining.contains_key(&hex.key())
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexKey, MovementCost)> + '_ {
        self.remaining.iter().map(|(key, remaining)| (*key, *remaining))
    }

    pub fn keys(&self) -> impl Iterator<Item = HexKey> + '_ {
        self.remaining.keys().copied()
    }
}

/// Flood fills outward from `start`, spending the cost of each hex entered,
/// and returns every hex reachable within `movement`.
///
/// Hexes are re-expanded whenever a cheaper route to them turns up, so the
/// remaining budget recorded for each hex is the best possible. The start hex
/// is always included with the full budget.
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let grid = FnHexGrid::new(|_: HexCoord| true);
/// let reachable = hex_reachable(&grid, HexCoord::ZERO, 2.0);
///
/// assert_eq!(reachable.len(), 19);
/// assert_eq!(reachable.get(HexCoord::ZERO), Some(2.0));
/// assert_eq!(reachable.get(HexCoord::new(1, 1)), Some(0.0));
/// ```
pub fn hex_reachable<G: HexPathGrid + ?Sized>(
    grid: &G,
    start: HexCoord,
    movement: MovementCost,
) -> HexReachable {
    debug_assert!(start.is_valid(), "start {start} is not a valid cube coordinate");
    debug_assert!(movement >= 0.0, "movement budget {movement} is negative");

    timed!("hex_reachable", {
        let mut remaining: FxIndexMap<HexKey, MovementCost> = FxIndexMap::default();
        remaining.insert(start.key(), movement);

        let mut frontier = VecDeque::new();
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            let budget = remaining[&current.key()];

            for neighbor in current.neighbors() {
                if !grid.is_walkable(neighbor) {
                    continue;
                }

                let step_cost = grid.cost(neighbor);
                debug_assert!(
                    step_cost > 0.0,
                    "walkable hex {neighbor} has non-positive cost {step_cost}"
                );

                let left = budget - step_cost;
                if left < 0.0 {
                    continue;
                }

                match remaining.entry(neighbor.key()) {
                    Vacant(e) => {
                        e.insert(left);
                    }
                    Occupied(mut e) => {
                        if *e.get() < left {
                            e.insert(left);
                        } else {
                            continue;
                        }
                    }
                }

                frontier.push_back(neighbor);
            }
        }

        log::trace!(
            "{} hexes reachable from {} with {} movement",
            remaining.len(),
            start,
            movement
        );

        HexReachable { remaining }
    })
}

/// Decodes the keys of a reachable map back into coordinates, in discovery order.
pub fn reachable_to_array(reachable: &HexReachable) -> Vec<HexCoord> {
    reachable.keys().map(HexKey::coord).collect()
}

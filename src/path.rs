//! This module defines the `PathResult` returned by every search.
use bevy::math::IVec2;

use crate::{hex::HexCoord, MovementCost};

/// The result of a pathfinding operation.
///
/// A search that can't reach its goal is not an error: it returns a result
/// with [`PathResult::found`] set to false, an empty path and zero cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult<P> {
    found: bool,
    path: Vec<P>,
    cost: MovementCost,
    explored: usize,
}

/// Result of a square grid search.
pub type GridPathResult = PathResult<IVec2>;

/// Result of a hex grid search.
pub type HexPathResult = PathResult<HexCoord>;

impl<P: Copy + PartialEq> PathResult<P> {
    /// A successful search. `path` runs from start to goal inclusive.
    pub(crate) fn reached(path: Vec<P>, cost: MovementCost, explored: usize) -> Self {
        PathResult {
            found: true,
            path,
            cost,
            explored,
        }
    }

    /// A failed search that expanded `explored` nodes before giving up.
    pub(crate) fn unreached(explored: usize) -> Self {
        PathResult {
            found: false,
            path: Vec::new(),
            cost: 0.0,
            explored,
        }
    }

    /// Returns true if a path from start to goal was found.
    pub fn found(&self) -> bool {
        self.found
    }

    /// The waypoints from start to goal inclusive, empty if no path was found.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arcane_pathfinding::prelude::*;
    ///
    /// let grid = GridMap::new(3, 1);
    /// let result = find_path(&grid, IVec2::new(0, 0), IVec2::new(2, 0), &PathOptions::default());
    /// assert_eq!(result.path(), &[IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(2, 0)]);
    /// ```
    pub fn path(&self) -> &[P] {
        &self.path
    }

    /// Total movement cost of the path, 0 if no path was found.
    pub fn cost(&self) -> MovementCost {
        self.cost
    }

    /// Number of nodes expanded by the search.
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// Returns the number of waypoints, including start and goal.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The waypoint after the start, which is where an agent should move next.
    /// `None` when no path was found or the agent is already at the goal.
    pub fn next_step(&self) -> Option<P> {
        self.path.get(1).copied()
    }

    /// The last waypoint of the path.
    pub fn goal(&self) -> Option<P> {
        self.path.last().copied()
    }

    /// Returns true if the path contains the given position
    pub fn is_position_in_path(&self, pos: P) -> bool {
        self.path.contains(&pos)
    }

    pub fn into_path(self) -> Vec<P> {
        self.path
    }
}

impl<P> IntoIterator for PathResult<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.into_iter()
    }
}

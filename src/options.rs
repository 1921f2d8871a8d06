//! Search options for square and hex A*.
use crate::Heuristic;

/// Default cap on open set expansions per search.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Options for [`crate::find_path`].
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let options = PathOptions::new()
///     .diagonal()
///     .heuristic(Heuristic::Euclidean)
///     .max_iterations(500);
///
/// assert!(options.diagonal);
/// assert_eq!(options.max_iterations, 500);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOptions {
    /// Allow the four diagonal moves in addition to N, E, S, W.
    pub diagonal: bool,
    /// Hard cap on expansions; hitting it ends the search as not found.
    pub max_iterations: usize,
    /// Distance estimate used to order the open set.
    pub heuristic: Heuristic,
}

impl Default for PathOptions {
    fn default() -> Self {
        PathOptions {
            diagonal: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            heuristic: Heuristic::Manhattan,
        }
    }
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables 8-directional movement.
    pub fn diagonal(mut self) -> Self {
        self.diagonal = true;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Options for [`crate::find_hex_path`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexPathOptions {
    /// Hard cap on expansions; hitting it ends the search as not found.
    pub max_iterations: usize,
}

impl Default for HexPathOptions {
    fn default() -> Self {
        HexPathOptions {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl HexPathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

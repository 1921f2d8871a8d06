use thiserror::Error;

/// Errors for the few fallible conversions in the crate.
///
/// Searches themselves never fail; an unreachable goal is reported through
/// [`crate::PathResult::found`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A reachable-map key wasn't of the form `"q,r"`.
    #[error("invalid hex key {0:?}, expected \"q,r\"")]
    InvalidHexKey(String),
    /// A heuristic name other than `manhattan`, `euclidean` or `chebyshev`.
    #[error("unknown heuristic {0:?}")]
    UnknownHeuristic(String),
    /// An ASCII map row didn't match the first row's width.
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An ASCII map contained a character with no tile meaning.
    #[error("unknown map tile {tile:?} at ({x}, {y})")]
    UnknownTile { tile: char, x: usize, y: usize },
}

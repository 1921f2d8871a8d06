//! Many independent square grid searches at once, e.g. one per monster per turn.
use bevy::math::IVec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{find_path, grid::PathGrid, path::GridPathResult, PathOptions};

/// Runs [`find_path`] for every `(start, goal)` pair and returns the results in the same order.
///
/// Searches share nothing but the read-only grid, so with the `parallel`
/// feature they're spread across the rayon thread pool.
pub fn find_paths<G: PathGrid + Sync + ?Sized>(
    grid: &G,
    requests: &[(IVec2, IVec2)],
    options: &PathOptions,
) -> Vec<GridPathResult> {
    #[cfg(feature = "parallel")]
    let iter = requests.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = requests.iter();

    iter.map(|&(start, goal)| find_path(grid, start, goal, options))
        .collect()
}

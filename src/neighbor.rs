use bevy::math::IVec2;
use smallvec::SmallVec;

use std::f32::consts::SQRT_2;
use std::fmt::Debug;

use crate::{grid::PathGrid, MovementCost};

/// N, E, S, W with `y` growing down.
pub(crate) const CARDINAL_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
];

/// The cardinal offsets followed by NE, SE, SW, NW.
pub(crate) const ORDINAL_OFFSETS: [IVec2; 8] = [
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, -1),
    IVec2::new(1, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, -1),
];

/// Walkable neighbors of a tile paired with the cost of stepping onto them.
pub(crate) type NeighborBuf = SmallVec<[(IVec2, MovementCost); 8]>;

pub(crate) trait Neighborhood: Clone + Debug + Default + Sync + Send {
    fn directions(&self) -> &'static [IVec2];

    #[inline(always)]
    fn neighbors<G: PathGrid + ?Sized>(&self, grid: &G, pos: IVec2, target: &mut NeighborBuf) {
        for &dir in self.directions() {
            let neighbor = pos + dir;

            if !grid.in_bounds(neighbor) || !grid.is_walkable(neighbor) {
                continue;
            }

            let cost = grid.cost(neighbor).unwrap_or_else(|| default_step_cost(dir));
            debug_assert!(
                cost > 0.0,
                "walkable tile {neighbor} has non-positive cost {cost}"
            );
            target.push((neighbor, cost));
        }
    }
}

/// Default cost model: 1 for a cardinal step, √2 for a diagonal one.
#[inline(always)]
pub(crate) fn default_step_cost(dir: IVec2) -> MovementCost {
    if dir.x != 0 && dir.y != 0 {
        SQRT_2
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CardinalNeighborhood;

impl Neighborhood for CardinalNeighborhood {
    #[inline(always)]
    fn directions(&self) -> &'static [IVec2] {
        &CARDINAL_OFFSETS
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OrdinalNeighborhood;

impl Neighborhood for OrdinalNeighborhood {
    #[inline(always)]
    fn directions(&self) -> &'static [IVec2] {
        &ORDINAL_OFFSETS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridMap, Nav};

    #[test]
    fn test_cardinal_neighbors() {
        let grid = GridMap::new(3, 3);
        let mut target = NeighborBuf::new();

        CardinalNeighborhood.neighbors(&grid, IVec2::new(1, 1), &mut target);

        assert_eq!(target.len(), 4);
        assert_eq!(target[0], (IVec2::new(1, 0), 1.0));
        assert_eq!(target[1], (IVec2::new(2, 1), 1.0));
        assert_eq!(target[2], (IVec2::new(1, 2), 1.0));
        assert_eq!(target[3], (IVec2::new(0, 1), 1.0));
    }

    #[test]
    fn test_ordinal_neighbors() {
        let grid = GridMap::new(3, 3);
        let mut target = NeighborBuf::new();

        OrdinalNeighborhood.neighbors(&grid, IVec2::new(1, 1), &mut target);

        assert_eq!(target.len(), 8);
        assert_eq!(target[4], (IVec2::new(2, 0), SQRT_2));
        assert_eq!(target[7], (IVec2::new(0, 0), SQRT_2));
    }

    #[test]
    fn test_ordinal_neighbors_at_corner() {
        let grid = GridMap::new(3, 3);
        let mut target = NeighborBuf::new();

        OrdinalNeighborhood.neighbors(&grid, IVec2::new(0, 0), &mut target);

        let positions: Vec<IVec2> = target.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(
            positions,
            vec![IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_neighbors_skip_walls_and_use_tile_cost() {
        let mut grid = GridMap::weighted(3, 3);
        grid.set_nav(IVec2::new(1, 0), Nav::Impassable);
        grid.set_nav(IVec2::new(2, 2), Nav::Passable(5.0));
        let mut target = NeighborBuf::new();

        OrdinalNeighborhood.neighbors(&grid, IVec2::new(1, 1), &mut target);

        assert_eq!(target.len(), 7);
        assert!(!target.iter().any(|(pos, _)| *pos == IVec2::new(1, 0)));
        // Weighted grids charge the tile cost regardless of direction.
        assert!(target.contains(&(IVec2::new(2, 2), 5.0)));
        assert!(target.contains(&(IVec2::new(0, 0), 1.0)));
    }

    #[test]
    fn test_default_step_cost() {
        assert_eq!(default_step_cost(IVec2::new(0, 1)), 1.0);
        assert_eq!(default_step_cost(IVec2::new(-1, 0)), 1.0);
        assert_eq!(default_step_cost(IVec2::new(1, -1)), SQRT_2);
    }
}

//! Square grid abstractions consumed by [`crate::find_path`].
//!
//! The search only ever talks to a [`PathGrid`]. Callers usually close over their
//! own tile storage with [`FnGrid`], or use the ready-made [`GridMap`].
use bevy::{math::IVec2, platform::collections::HashSet};
use ndarray::Array2;

use crate::{MovementCost, PathError};

/// Cost of entering a plain floor tile.
pub const DEFAULT_COST: MovementCost = 1.0;

/// A square grid as seen by the pathfinder.
///
/// `is_walkable` must give the same answer for a position for the whole
/// duration of one search. The search bounds checks positions against
/// `width`/`height` before calling it.
pub trait PathGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn is_walkable(&self, pos: IVec2) -> bool;

    /// Cost of stepping onto `pos`. Must be > 0 for walkable positions.
    ///
    /// `None` selects the default cost model: 1 for a cardinal step and √2 for
    /// a diagonal one.
    fn cost(&self, _pos: IVec2) -> Option<MovementCost> {
        None
    }

    #[inline(always)]
    fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width() && (pos.y as u32) < self.height()
    }
}

impl<G: PathGrid + ?Sized> PathGrid for &G {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn is_walkable(&self, pos: IVec2) -> bool {
        (**self).is_walkable(pos)
    }

    fn cost(&self, pos: IVec2) -> Option<MovementCost> {
        (**self).cost(pos)
    }
}

/// Navigation state of a tile in a [`GridMap`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Nav {
    /// Agents can enter this tile for the given cost.
    Passable(MovementCost),
    /// Agents can never enter this tile.
    Impassable,
}

impl Default for Nav {
    fn default() -> Self {
        Nav::Passable(DEFAULT_COST)
    }
}

impl Nav {
    pub fn is_passable(&self) -> bool {
        matches!(self, Nav::Passable(_))
    }
}

/// A tile map stored in a 2D array, indexed `[x, y]`.
///
/// The cost model is picked when the map is built and never changes.
/// [`GridMap::new`] uses the default model (1 per cardinal step, √2 per
/// diagonal step) and ignores the cost stored in [`Nav::Passable`].
/// [`GridMap::weighted`] charges the cost of the tile being entered for every
/// step, diagonal or not.
#[derive(Debug, Clone)]
pub struct GridMap {
    tiles: Array2<Nav>,
    weighted: bool,
}

impl GridMap {
    /// Creates an open map using the default cardinal/diagonal cost model.
    pub fn new(width: u32, height: u32) -> Self {
        GridMap {
            tiles: Array2::from_elem((width as usize, height as usize), Nav::default()),
            weighted: false,
        }
    }

    /// Creates an open map where every step costs the cost of the tile entered.
    pub fn weighted(width: u32, height: u32) -> Self {
        GridMap {
            weighted: true,
            ..GridMap::new(width, height)
        }
    }

    /// Parses a map drawn in ASCII, one row per line.
    ///
    /// `#` is a wall, `.` is floor and the digits `1` to `9` are floor with that
    /// movement cost. A drawing containing any digit builds a
    /// [weighted](GridMap::weighted) map, otherwise the default cost model is
    /// used. Blank lines and surrounding whitespace are ignored.
    ///
    /// ```rust
    /// use arcane_pathfinding::prelude::*;
    ///
    /// let map = GridMap::from_ascii(
    ///     "..#
    ///      .3.",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(map.width(), 3);
    /// assert!(map.is_weighted());
    /// assert!(!map.is_walkable(IVec2::new(2, 0)));
    /// assert_eq!(map.nav(IVec2::new(1, 1)), Some(Nav::Passable(3.0)));
    /// ```
    pub fn from_ascii(map: &str) -> Result<Self, PathError> {
        let rows: Vec<Vec<char>> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len() as u32;
        let mut grid = if rows.iter().flatten().any(char::is_ascii_digit) {
            GridMap::weighted(width as u32, height)
        } else {
            GridMap::new(width as u32, height)
        };

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PathError::RaggedMap {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }

            for (x, &tile) in row.iter().enumerate() {
                let nav = match tile {
                    '#' => Nav::Impassable,
                    '.' => Nav::Passable(DEFAULT_COST),
                    '1'..='9' => Nav::Passable(tile.to_digit(10).unwrap_or(1) as MovementCost),
                    _ => return Err(PathError::UnknownTile { tile, x, y }),
                };
                grid.set_nav(IVec2::new(x as i32, y as i32), nav);
            }
        }

        Ok(grid)
    }

    /// Sets the navigation state of a tile. Out of bounds positions are ignored.
    ///
    /// Only changes this tile; the map's cost model stays as it was built.
    pub fn set_nav(&mut self, pos: IVec2, nav: Nav) {
        debug_assert!(
            !matches!(nav, Nav::Passable(cost) if cost <= 0.0),
            "passable tiles need a positive cost, got {nav:?} at {pos}"
        );

        if !self.in_bounds(pos) {
            return;
        }

        self.tiles[[pos.x as usize, pos.y as usize]] = nav;
    }

    /// Returns the navigation state of a tile, `None` if out of bounds.
    pub fn nav(&self, pos: IVec2) -> Option<Nav> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[[pos.x as usize, pos.y as usize]])
    }

    /// Returns true if steps cost the entered tile's cost rather than 1 / √2.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }
}

impl PathGrid for GridMap {
    fn width(&self) -> u32 {
        self.tiles.shape()[0] as u32
    }

    fn height(&self) -> u32 {
        self.tiles.shape()[1] as u32
    }

    fn is_walkable(&self, pos: IVec2) -> bool {
        self.nav(pos).is_some_and(|nav| nav.is_passable())
    }

    fn cost(&self, pos: IVec2) -> Option<MovementCost> {
        if !self.weighted {
            return None;
        }

        match self.nav(pos)? {
            Nav::Passable(cost) => Some(cost),
            Nav::Impassable => None,
        }
    }
}

/// A [`PathGrid`] built from closures over the caller's own map.
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let walls = [IVec2::new(1, 0)];
/// let grid = FnGrid::new(4, 4, |pos| !walls.contains(&pos));
///
/// let result = find_path(&grid, IVec2::new(0, 0), IVec2::new(2, 0), &PathOptions::default());
/// assert_eq!(result.cost(), 4.0);
/// ```
pub struct FnGrid<W, C = fn(IVec2) -> MovementCost> {
    width: u32,
    height: u32,
    walkable: W,
    cost: Option<C>,
}

impl<W> FnGrid<W>
where
    W: Fn(IVec2) -> bool,
{
    pub fn new(width: u32, height: u32, walkable: W) -> Self {
        FnGrid {
            width,
            height,
            walkable,
            cost: None,
        }
    }
}

impl<W, C> FnGrid<W, C> {
    /// Replaces the default cost model with a per tile cost.
    pub fn with_cost<F>(self, cost: F) -> FnGrid<W, F>
    where
        F: Fn(IVec2) -> MovementCost,
    {
        FnGrid {
            width: self.width,
            height: self.height,
            walkable: self.walkable,
            cost: Some(cost),
        }
    }
}

impl<W, C> PathGrid for FnGrid<W, C>
where
    W: Fn(IVec2) -> bool,
    C: Fn(IVec2) -> MovementCost,
{
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_walkable(&self, pos: IVec2) -> bool {
        (self.walkable)(pos)
    }

    fn cost(&self, pos: IVec2) -> Option<MovementCost> {
        self.cost.as_ref().map(|cost| cost(pos))
    }
}

/// Wraps a grid and treats an extra set of positions as unwalkable,
/// e.g. tiles occupied by other monsters.
#[derive(Debug, Clone)]
pub struct Blocked<G> {
    grid: G,
    blocked: HashSet<IVec2>,
}

impl<G: PathGrid> Blocked<G> {
    pub fn new(grid: G) -> Self {
        Blocked {
            grid,
            blocked: HashSet::new(),
        }
    }

    pub fn with_blocked(grid: G, blocked: impl IntoIterator<Item = IVec2>) -> Self {
        Blocked {
            grid,
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn block(&mut self, pos: IVec2) {
        self.blocked.insert(pos);
    }

    pub fn unblock(&mut self, pos: IVec2) {
        self.blocked.remove(&pos);
    }

    pub fn is_blocked(&self, pos: IVec2) -> bool {
        self.blocked.contains(&pos)
    }

    pub fn inner(&self) -> &G {
        &self.grid
    }
}

impl<G: PathGrid> PathGrid for Blocked<G> {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn is_walkable(&self, pos: IVec2) -> bool {
        !self.blocked.contains(&pos) && self.grid.is_walkable(pos)
    }

    fn cost(&self, pos: IVec2) -> Option<MovementCost> {
        self.grid.cost(pos)
    }
}

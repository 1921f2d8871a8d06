//! Hex coordinates and the hex grid abstraction consumed by [`crate::find_hex_path`]
//! and [`crate::hex_reachable`].
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};

use crate::{MovementCost, PathError};

/// A cube coordinate on a hex grid. `q + r + s` is always 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl HexCoord {
    pub const ZERO: HexCoord = HexCoord { q: 0, r: 0, s: 0 };

    /// Creates a coordinate from its axial `q`, `r` components.
    pub const fn new(q: i32, r: i32) -> Self {
        HexCoord { q, r, s: -q - r }
    }

    /// Creates a coordinate from all three cube components.
    ///
    /// The components must sum to zero.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Self {
        debug_assert!(q + r + s == 0, "cube coordinate ({q}, {r}, {s}) doesn't sum to zero");
        HexCoord { q, r, s }
    }

    pub fn is_valid(&self) -> bool {
        self.q + self.r + self.s == 0
    }

    pub fn neighbor(self, dir: HexDirection) -> Self {
        self + dir.offset()
    }

    /// The six adjacent hexes, in [`HexDirection`] order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        HEX_OFFSETS.map(|offset| self + offset)
    }

    /// Number of steps between two hexes.
    pub fn distance(self, other: HexCoord) -> i32 {
        let d = self - other;
        (d.q.abs() + d.r.abs() + d.s.abs()) / 2
    }

    /// Every hex within `radius` steps, including `self`.
    pub fn range(self, radius: i32) -> Vec<HexCoord> {
        let mut hexes = Vec::new();
        for q in -radius..=radius {
            for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
                hexes.push(self + HexCoord::new(q, r));
            }
        }
        hexes
    }

    pub fn key(self) -> HexKey {
        HexKey {
            q: self.q,
            r: self.r,
        }
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, other: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q + other.q,
            r: self.r + other.r,
            s: self.s + other.s,
        }
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, other: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q - other.q,
            r: self.r - other.r,
            s: self.s - other.s,
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// The six unit steps on a hex grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

pub(crate) const HEX_OFFSETS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
];

impl HexDirection {
    pub fn all() -> HexDirectionIter {
        HexDirection::iter()
    }

    pub fn offset(self) -> HexCoord {
        HEX_OFFSETS[self as usize]
    }

    pub fn opposite(self) -> HexDirection {
        match self {
            HexDirection::East => HexDirection::West,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::West => HexDirection::East,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
        }
    }
}

/// Canonical key of a hex in a [`crate::HexReachable`] map.
///
/// `s` is implied by `q` and `r`. Formats as `"q,r"` and parses back from it,
/// which is also its serialized form so it can key JSON maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct HexKey {
    pub q: i32,
    pub r: i32,
}

impl HexKey {
    pub fn coord(self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

impl From<HexCoord> for HexKey {
    fn from(hex: HexCoord) -> Self {
        hex.key()
    }
}

impl From<HexKey> for HexCoord {
    fn from(key: HexKey) -> Self {
        key.coord()
    }
}

impl fmt::Display for HexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl From<HexKey> for String {
    fn from(key: HexKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for HexKey {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for HexKey {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PathError::InvalidHexKey(s.to_string());

        let (q, r) = s.split_once(',').ok_or_else(invalid)?;
        let q = q.trim().parse().map_err(|_| invalid())?;
        let r = r.trim().parse().map_err(|_| invalid())?;

        Ok(HexKey { q, r })
    }
}

/// A hex grid as seen by the pathfinder.
///
/// Hex grids have no dimensions; `is_walkable` is responsible for keeping
/// searches bounded and must give the same answer for a hex for the whole
/// duration of one search.
pub trait HexPathGrid {
    fn is_walkable(&self, hex: HexCoord) -> bool;

    /// Cost of stepping onto `hex`. Must be > 0 for walkable hexes.
    fn cost(&self, _hex: HexCoord) -> MovementCost {
        1.0
    }
}

impl<G: HexPathGrid + ?Sized> HexPathGrid for &G {
    fn is_walkable(&self, hex: HexCoord) -> bool {
        (**self).is_walkable(hex)
    }

    fn cost(&self, hex: HexCoord) -> MovementCost {
        (**self).cost(hex)
    }
}

/// A [`HexPathGrid`] built from closures over the caller's own map.
///
/// ```rust
/// use arcane_pathfinding::prelude::*;
///
/// let grid = FnHexGrid::new(|hex: HexCoord| hex.distance(HexCoord::ZERO) <= 3)
///     .with_cost(|hex: HexCoord| if hex.q == 1 { 3.0 } else { 1.0 });
///
/// assert!(grid.is_walkable(HexCoord::new(2, 1)));
/// assert!(!grid.is_walkable(HexCoord::new(4, 0)));
/// assert_eq!(grid.cost(HexCoord::new(1, 0)), 3.0);
/// ```
pub struct FnHexGrid<W, C = fn(HexCoord) -> MovementCost> {
    walkable: W,
    cost: Option<C>,
}

impl<W> FnHexGrid<W>
where
    W: Fn(HexCoord) -> bool,
{
    pub fn new(walkable: W) -> Self {
        FnHexGrid {
            walkable,
            cost: None,
        }
    }
}

impl<W, C> FnHexGrid<W, C> {
    pub fn with_cost<F>(self, cost: F) -> FnHexGrid<W, F>
    where
        F: Fn(HexCoord) -> MovementCost,
    {
        FnHexGrid {
            walkable: self.walkable,
            cost: Some(cost),
        }
    }
}

impl<W, C> HexPathGrid for FnHexGrid<W, C>
where
    W: Fn(HexCoord) -> bool,
    C: Fn(HexCoord) -> MovementCost,
{
    fn is_walkable(&self, hex: HexCoord) -> bool {
        (self.walkable)(hex)
    }

    fn cost(&self, hex: HexCoord) -> MovementCost {
        self.cost.as_ref().map_or(1.0, |cost| cost(hex))
    }
}

//! Distance estimates for square grid A*.
use std::str::FromStr;

use bevy::math::IVec2;
use strum::{Display, EnumIter, EnumString};

use crate::{MovementCost, PathError};

/// Distance estimate added to the path cost to order the open set.
///
/// With 4-directional movement all three underestimate, so the choice only
/// changes how many nodes get explored. With diagonal movement `Manhattan`
/// counts a √2 diagonal step as 2 and may settle for a longer path;
/// `Euclidean` stays exact and `Chebyshev` undershoots diagonal moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// `|dx| + |dy|`, tight for 4-directional unit cost movement.
    #[default]
    Manhattan,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
    /// `max(|dx|, |dy|)`.
    Chebyshev,
}

impl Heuristic {
    /// Looks up a heuristic by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, PathError> {
        Heuristic::from_str(name).map_err(|_| PathError::UnknownHeuristic(name.to_string()))
    }

    #[inline(always)]
    pub fn distance(self, pos: IVec2, target: IVec2) -> MovementCost {
        let d = (pos - target).abs();
        let (dx, dy) = (d.x as MovementCost, d.y as MovementCost);

        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Chebyshev => dx.max(dy),
        }
    }
}

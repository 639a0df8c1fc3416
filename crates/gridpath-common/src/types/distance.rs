//! Accumulated path cost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distance from the traversal root to a vertex.
///
/// `Infinite` means "not reached yet" and orders after every finite value,
/// so `min` and `<` comparisons work without sentinels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Distance {
    /// A reached vertex with its accumulated hop count or edge weight.
    Finite(i64),
    /// Not reached.
    #[default]
    Infinite,
}

impl Distance {
    /// The root's distance.
    pub const ZERO: Self = Self::Finite(0);

    /// Returns true if the distance is finite.
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Returns the finite value, if any.
    #[inline]
    #[must_use]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Infinite => None,
        }
    }

    /// Extends this distance by one edge of the given weight.
    ///
    /// Infinite stays infinite. Finite sums saturate instead of wrapping.
    #[inline]
    #[must_use]
    pub const fn add_weight(self, weight: i64) -> Self {
        match self {
            Self::Finite(d) => Self::Finite(d.saturating_add(weight)),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl From<i64> for Distance {
    fn from(d: i64) -> Self {
        Self::Finite(d)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

//! Neighbor topologies.

use std::fmt;

/// Which grid cells count as neighbors of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Up, down, left, right.
    #[default]
    Cross,
    /// The four diagonals.
    Diagonal,
    /// Union of `Cross` and `Diagonal`.
    Regular,
}

const CROSS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const REGULAR: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl Topology {
    /// Row/column offsets of the neighbors, in the order they are reported.
    #[must_use]
    pub const fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Cross => &CROSS,
            Self::Diagonal => &DIAGONAL,
            Self::Regular => &REGULAR,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cross => write!(f, "cross"),
            Self::Diagonal => write!(f, "diagonal"),
            Self::Regular => write!(f, "regular"),
        }
    }
}

//! Grid coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A graph vertex: a row/column coordinate in the backing grid.
///
/// Vertices compare and hash by value, so two vertices built from the same
/// coordinates are interchangeable as map keys and set members on any thread.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Vertex {
    /// Row index (0 is the top row).
    pub row: usize,
    /// Column index (0 is the leftmost column).
    pub col: usize,
}

impl Vertex {
    /// Creates a vertex at the given coordinates.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the vertex shifted by `(dr, dc)`, or `None` if either
    /// coordinate would become negative or overflow.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Vertex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// A directed step between two adjacent value-bearing vertices.
///
/// The cost of the step is the value stored at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex.
    pub from: Vertex,
    /// Target vertex.
    pub to: Vertex,
}

impl Edge {
    /// Creates a new edge.
    #[inline]
    #[must_use]
    pub const fn new(from: Vertex, to: Vertex) -> Self {
        Self { from, to }
    }

    /// Returns the same edge traversed in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_value_equality() {
        let a = Vertex::new(2, 3);
        let b = Vertex::from((2, 3));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_vertex_offset() {
        let v = Vertex::new(0, 1);
        assert_eq!(v.offset(1, 1), Some(Vertex::new(1, 2)));
        assert_eq!(v.offset(0, -1), Some(Vertex::new(0, 0)));
        assert_eq!(v.offset(-1, 0), None);
        assert_eq!(Vertex::new(0, 0).offset(0, -1), None);
    }

    #[test]
    fn test_vertex_ordering_is_row_major() {
        let mut vs = vec![Vertex::new(1, 0), Vertex::new(0, 2), Vertex::new(0, 1)];
        vs.sort();
        assert_eq!(
            vs,
            vec![Vertex::new(0, 1), Vertex::new(0, 2), Vertex::new(1, 0)]
        );
    }

    #[test]
    fn test_vertex_display_and_serde() {
        let v = Vertex::new(4, 7);
        assert_eq!(v.to_string(), "(4, 7)");

        let json = serde_json::to_string(&v).unwrap();
        let back: Vertex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_edge_reversed() {
        let e = Edge::new(Vertex::new(0, 0), Vertex::new(0, 1));
        assert_eq!(e.reversed(), Edge::new(Vertex::new(0, 1), Vertex::new(0, 0)));
    }
}

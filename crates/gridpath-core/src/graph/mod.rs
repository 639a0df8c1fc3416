//! Graph model.
//!
//! Algorithms see a graph only through the [`Graph`] trait. The one concrete
//! implementation, [`GridGraph`], is a read-only view over a [`Matrix`] whose
//! neighbor relation is chosen by a [`Topology`].

mod grid;
mod matrix;
mod topology;

pub use grid::GridGraph;
pub use matrix::{Matrix, MatrixKind};
pub use topology::Topology;

use gridpath_common::types::{Edge, Vertex};
use smallvec::SmallVec;

/// Neighbor list. Eight inline slots cover the densest topology.
pub type Neighbors = SmallVec<[Vertex; 8]>;

/// Read-only graph contract shared by every algorithm.
///
/// Implementations must be safe to query from many threads at once; no
/// algorithm mutates the graph it traverses.
pub trait Graph: Send + Sync {
    /// The traversal root. Always a vertex that carries a value.
    fn root(&self) -> Vertex;

    /// All neighbors of `v` under the topology, ignoring values.
    ///
    /// Empty if `v` is outside the graph.
    fn adjacent(&self, v: Vertex) -> Neighbors;

    /// The value-bearing subset of [`adjacent`](Self::adjacent).
    ///
    /// Empty if `v` itself carries no value.
    fn reachable(&self, v: Vertex) -> Neighbors;

    /// Every value-bearing vertex.
    fn vertices(&self) -> Vec<Vertex>;

    /// Every directed step between adjacent value-bearing vertices.
    fn edges(&self) -> Vec<Edge>;

    /// The value at `v`: the weight of any edge entering `v`, or `None` if
    /// the cell is empty or outside the graph.
    fn value_at(&self, v: Vertex) -> Option<i64>;

    /// Grid dimensions as `(rows, cols)`.
    fn dimensions(&self) -> (usize, usize);

    /// Returns true if `v` carries a value.
    fn has_value(&self, v: Vertex) -> bool {
        self.value_at(v).is_some()
    }

    /// Number of value-bearing vertices.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }
}

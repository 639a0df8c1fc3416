//! Grid-backed graph view.

use std::sync::Arc;

use gridpath_common::types::{Edge, Vertex};
use gridpath_common::utils::error::{Error, Result};

use super::{Graph, Matrix, Neighbors, Topology};

/// An immutable graph over a shared [`Matrix`].
///
/// Cloning and re-rooting share the matrix, so one grid can back many
/// concurrent traversals from different roots.
#[derive(Debug, Clone)]
pub struct GridGraph {
    matrix: Arc<Matrix>,
    topology: Topology,
    root: Vertex,
}

impl GridGraph {
    /// Creates a graph rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `root` is outside the grid and
    /// [`Error::NoValueAt`] if it is an empty cell.
    pub fn new(matrix: impl Into<Arc<Matrix>>, topology: Topology, root: Vertex) -> Result<Self> {
        let matrix = matrix.into();
        if !matrix.contains(root) {
            return Err(Error::OutOfBounds(root));
        }
        if !matrix.is_present(root) {
            return Err(Error::NoValueAt(root));
        }
        Ok(Self {
            matrix,
            topology,
            root,
        })
    }

    /// Creates a graph rooted at the first value-bearing cell in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGraph`] if no cell carries a value.
    pub fn with_first_root(matrix: impl Into<Arc<Matrix>>, topology: Topology) -> Result<Self> {
        let matrix = matrix.into();
        let (root, _) = matrix.present().next().ok_or(Error::EmptyGraph)?;
        Ok(Self {
            matrix,
            topology,
            root,
        })
    }

    /// Returns the same graph rooted elsewhere.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GridGraph::new`].
    pub fn rerooted(&self, root: Vertex) -> Result<Self> {
        Self::new(Arc::clone(&self.matrix), self.topology, root)
    }

    /// The backing matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The neighbor topology.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }
}

impl Graph for GridGraph {
    fn root(&self) -> Vertex {
        self.root
    }

    fn adjacent(&self, v: Vertex) -> Neighbors {
        if !self.matrix.contains(v) {
            return Neighbors::new();
        }
        self.topology
            .offsets()
            .iter()
            .filter_map(|&(dr, dc)| v.offset(dr, dc))
            .filter(|&n| self.matrix.contains(n))
            .collect()
    }

    fn reachable(&self, v: Vertex) -> Neighbors {
        if !self.matrix.is_present(v) {
            return Neighbors::new();
        }
        let mut neighbors = self.adjacent(v);
        neighbors.retain(|n| self.matrix.is_present(*n));
        neighbors
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.matrix.present().map(|(v, _)| v).collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.matrix
            .present()
            .flat_map(|(v, _)| self.reachable(v).into_iter().map(move |n| Edge::new(v, n)))
            .collect()
    }

    fn value_at(&self, v: Vertex) -> Option<i64> {
        self.matrix.get(v)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.matrix.rows(), self.matrix.cols())
    }

    fn vertex_count(&self) -> usize {
        self.matrix.count_present()
    }
}

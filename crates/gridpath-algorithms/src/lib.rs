//! # gridpath-algorithms
//!
//! Traversals over Gridpath graphs.
//!
//! ## Modules
//!
//! - [`distance`] - Per-vertex distance and parents, the result map
//! - [`traits`] - The shortest-path contract and algorithm selection
//! - [`bfs`] - Unweighted shortest paths with tie tracking
//! - [`bellman_ford`] - Weighted shortest paths with negative-cycle detection
//! - [`parallel`] - Weighted relaxation by recursive fan-out
//! - [`components`] - Connected components with a shared memo
//! - [`paths`] - Path enumeration and parent backtracking
//!
//! ## Usage
//!
//! ```no_run
//! use gridpath_algorithms::{Bfs, PathEnumerator};
//! use gridpath_core::{CancelFlag, GridGraph, Matrix, Topology};
//! use gridpath_common::Vertex;
//!
//! let matrix = Matrix::binary(&[vec![1, 1], vec![1, 1]])?;
//! let graph = GridGraph::new(matrix, Topology::Cross, Vertex::new(0, 0))?;
//! let paths = PathEnumerator::new(CancelFlag::new())
//!     .all_shortest_paths(&graph, &Bfs, Vertex::new(1, 1))?;
//! assert_eq!(paths.len(), 2);
//! # Ok::<(), gridpath_common::Error>(())
//! ```

#![warn(missing_docs)]

pub mod bellman_ford;
pub mod bfs;
pub mod components;
pub mod distance;
pub mod parallel;
pub mod paths;
pub mod traits;

#[cfg(test)]
mod testing;

pub use bellman_ford::BellmanFord;
pub use bfs::Bfs;
pub use components::{Component, ComponentFinder};
pub use distance::{DistanceMap, Relaxation, VertexDistanceInfo};
pub use parallel::{DEFAULT_BRANCHING_THRESHOLD, ParallelDijkstra};
pub use paths::{DEFAULT_MAX_ENUMERATION_DIM, Path, PathEnumerator};
pub use traits::{ShortestPathAlgorithm, WeightedAlgorithm};

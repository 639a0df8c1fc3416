//! # Gridpath
//!
//! Shortest paths, connected components and path enumeration over graphs
//! laid out on a 2-D grid.
//!
//! Start with [`GridPathEngine`]. It owns the executor that parallel queries
//! run on. Build a [`Matrix`] from your cell values, wrap it in a
//! [`GridGraph`] with a [`Topology`] and a root, then ask the engine.
//!
//! ## Topologies
//!
//! | Topology | Neighbors |
//! | -------- | --------- |
//! | `Cross` | up, down, left, right |
//! | `Diagonal` | the four diagonals |
//! | `Regular` | all eight |
//!
//! ## Quick Start
//!
//! ```rust
//! use gridpath::{GridGraph, GridPathEngine, Matrix, Topology, Vertex, WeightedAlgorithm};
//!
//! let engine = GridPathEngine::new()?;
//!
//! // Cell values are the weight of stepping onto that cell
//! let matrix = Matrix::weighted(&[vec![100, 100, 100], vec![500, 900, 300]])?;
//! let graph = GridGraph::new(matrix, Topology::Cross, Vertex::new(1, 0))?;
//!
//! let paths = engine.shortest_paths_weighted(
//!     &graph,
//!     Vertex::new(1, 2),
//!     WeightedAlgorithm::BellmanFord,
//! )?;
//! assert_eq!(paths.len(), 1);
//! # Ok::<(), gridpath::Error>(())
//! ```

// Re-export the engine API
pub use gridpath_engine::{Config, ConfigError, GridPathEngine};

// Re-export the graph model and executor knobs
pub use gridpath_core::{
    CancelFlag, DualPoolExecutor, ExecutorConfig, Graph, GridGraph, Matrix, MatrixKind, Topology,
};

// Re-export algorithms for callers that want to drive them directly
pub use gridpath_algorithms::{
    BellmanFord, Bfs, Component, ComponentFinder, DistanceMap, ParallelDijkstra, Path,
    PathEnumerator, ShortestPathAlgorithm, WeightedAlgorithm,
};

// Re-export common types - you'll need these for vertices and errors
pub use gridpath_common::{Distance, Edge, Error, ErrorCategory, ExecutorError, Result, Vertex};

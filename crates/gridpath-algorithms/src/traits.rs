//! The contract shared by the shortest-path algorithms.

use gridpath_common::types::Vertex;
use gridpath_common::utils::error::Result;
use gridpath_core::graph::Graph;

use crate::distance::DistanceMap;

/// A single-source shortest-path algorithm.
///
/// Implementations start at [`Graph::root`] and report every vertex they
/// reached with its distance and parents.
pub trait ShortestPathAlgorithm: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the traversal.
    ///
    /// `destination` lets an implementation stop early once the answer for
    /// that vertex is final. Implementations that need a full run ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm cannot answer for this graph, for
    /// example [`Error::NegativeCycle`](gridpath_common::Error::NegativeCycle).
    fn run(&self, graph: &dyn Graph, destination: Option<Vertex>) -> Result<DistanceMap>;
}

/// Selects the algorithm behind a weighted shortest-path query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeightedAlgorithm {
    /// Single-threaded and exact; refuses graphs with a negative cycle.
    #[default]
    BellmanFord,
    /// Recursive fan-out on the executor's recursive pool; best effort
    /// through negative cycles.
    ParallelDijkstra,
}

impl WeightedAlgorithm {
    /// Name used in logs and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BellmanFord => "bellman-ford",
            Self::ParallelDijkstra => "parallel-dijkstra",
        }
    }
}

impl std::fmt::Display for WeightedAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! GridPathEngine: the query surface over grid graphs.

use std::sync::Arc;
use std::time::Duration;

use gridpath_algorithms::{
    BellmanFord, Bfs, Component, ComponentFinder, DistanceMap, ParallelDijkstra, Path,
    PathEnumerator, ShortestPathAlgorithm, WeightedAlgorithm,
};
use gridpath_common::types::Vertex;
use gridpath_common::utils::error::{Error, Result};
use gridpath_core::execution::{DualPoolExecutor, PendingTask};
use gridpath_core::graph::Graph;

use crate::config::Config;

/// Entry point for every graph query.
///
/// Owns the dual-pool executor the parallel traversal and component sweeps
/// run on. Graphs are passed per call; the engine keeps no graph state.
///
/// # Examples
///
/// ```no_run
/// use gridpath_engine::GridPathEngine;
/// use gridpath_common::Vertex;
/// use gridpath_core::{GridGraph, Matrix, Topology};
///
/// let engine = GridPathEngine::new()?;
/// let matrix = Matrix::binary(&[vec![1, 1, 1], vec![1, 0, 1]])?;
/// let graph = GridGraph::new(matrix, Topology::Cross, Vertex::new(1, 0))?;
///
/// let paths = engine.shortest_paths(&graph, Vertex::new(1, 2))?;
/// assert_eq!(paths.len(), 1);
/// # Ok::<(), gridpath_common::Error>(())
/// ```
#[derive(Debug)]
pub struct GridPathEngine {
    config: Config,
    executor: Arc<DualPoolExecutor>,
}

impl GridPathEngine {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the executor pools cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Creates an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the configuration is invalid or the
    /// executor pools cannot be created.
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::Internal(e.to_string()))?;

        let executor = Arc::new(DualPoolExecutor::new(config.executor.clone())?);
        tracing::info!(
            general_threads = executor.general_threads(),
            recursive_threads = executor.recursive_threads(),
            max_enumeration_dim = config.max_enumeration_dim,
            "Engine started"
        );
        Ok(Self { config, executor })
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the executor backing parallel work.
    #[must_use]
    pub fn executor(&self) -> &Arc<DualPoolExecutor> {
        &self.executor
    }

    // === Queries ===

    /// Every minimum-hop path from the graph root to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] or [`Error::NoValueAt`] for a bad
    /// destination.
    pub fn shortest_paths(&self, graph: &dyn Graph, destination: Vertex) -> Result<Vec<Path>> {
        check_endpoint(graph, destination)?;
        self.enumerator().all_shortest_paths(graph, &Bfs, destination)
    }

    /// Every minimum-weight path from the graph root to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeCycle`] if Bellman-Ford is selected and finds
    /// one, and the destination errors of [`shortest_paths`](Self::shortest_paths).
    pub fn shortest_paths_weighted(
        &self,
        graph: &dyn Graph,
        destination: Vertex,
        algorithm: WeightedAlgorithm,
    ) -> Result<Vec<Path>> {
        check_endpoint(graph, destination)?;
        let algorithm = self.weighted(algorithm);
        self.enumerator()
            .all_shortest_paths(graph, algorithm.as_ref(), destination)
    }

    /// Every simple path from the graph root to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] if the grid exceeds the configured
    /// enumeration bound, and the destination errors of
    /// [`shortest_paths`](Self::shortest_paths).
    pub fn all_paths(&self, graph: &dyn Graph, destination: Vertex) -> Result<Vec<Path>> {
        let enumerator = self.enumerator();
        enumerator.check_bounds(graph)?;
        check_endpoint(graph, destination)?;
        enumerator.all_paths(graph, graph.root(), destination)
    }

    /// Components in the region around the graph root, ascending by size.
    ///
    /// Empty if the executor was cancelled.
    pub fn connected_components(&self, graph: &dyn Graph) -> Vec<Component> {
        ComponentFinder::new().find(graph, &self.executor.cancel_flag())
    }

    /// Components covering every value-bearing vertex, built by concurrent
    /// tasks on the general pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Executor`] if the engine is shut down or a task
    /// panicked.
    pub fn connected_components_all<G: Graph + 'static>(
        &self,
        graph: &Arc<G>,
    ) -> Result<Vec<Component>> {
        ComponentFinder::new().sweep(graph, &self.executor)
    }

    /// Weighted distances and parents from the graph root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeCycle`] if Bellman-Ford is selected and finds
    /// one.
    pub fn distances(
        &self,
        graph: &dyn Graph,
        algorithm: WeightedAlgorithm,
    ) -> Result<DistanceMap> {
        self.weighted(algorithm).run(graph, None)
    }

    /// Hop distances and parents from the graph root.
    pub fn hop_distances(&self, graph: &dyn Graph) -> Result<DistanceMap> {
        Bfs.run(graph, None)
    }

    // === Lifecycle ===

    /// Stops accepting work and lets running work finish.
    pub fn shutdown(&self) {
        self.executor.shutdown();
    }

    /// Stops accepting work, cancels running traversals, and returns queued
    /// work that never started.
    pub fn shutdown_now(&self) -> Vec<PendingTask> {
        self.executor.shutdown_now()
    }

    /// Returns true once [`shutdown_now`](Self::shutdown_now) was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.executor.is_cancelled()
    }

    /// Blocks until all accepted work finished or `timeout` elapsed.
    pub fn await_termination(&self, timeout: Duration) -> bool {
        self.executor.await_termination(timeout)
    }

    fn enumerator(&self) -> PathEnumerator {
        PathEnumerator::new(self.executor.cancel_flag())
            .with_max_dim(self.config.max_enumeration_dim)
    }

    fn weighted(&self, algorithm: WeightedAlgorithm) -> Box<dyn ShortestPathAlgorithm> {
        match algorithm {
            WeightedAlgorithm::BellmanFord => Box::new(BellmanFord),
            WeightedAlgorithm::ParallelDijkstra => Box::new(
                ParallelDijkstra::new(Arc::clone(&self.executor))
                    .with_branching_threshold(self.config.branching_threshold),
            ),
        }
    }
}

/// A destination must be an in-bounds, value-bearing cell.
fn check_endpoint(graph: &dyn Graph, v: Vertex) -> Result<()> {
    let (rows, cols) = graph.dimensions();
    if v.row >= rows || v.col >= cols {
        return Err(Error::OutOfBounds(v));
    }
    if !graph.has_value(v) {
        return Err(Error::NoValueAt(v));
    }
    Ok(())
}

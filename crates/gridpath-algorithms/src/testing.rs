//! Graph wrappers for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gridpath_common::types::{Edge, Vertex};
use gridpath_core::graph::{Graph, GridGraph, Matrix, Neighbors, Topology};

/// Delegates to a [`GridGraph`], counting `reachable` calls and optionally
/// sleeping in every neighbor lookup.
pub(crate) struct InstrumentedGraph {
    inner: GridGraph,
    delay: Option<Duration>,
    reachable_calls: AtomicUsize,
}

impl InstrumentedGraph {
    pub(crate) fn new(inner: GridGraph) -> Self {
        Self {
            inner,
            delay: None,
            reachable_calls: AtomicUsize::new(0),
        }
    }

    /// An all-ones weighted grid rooted at `(0, 0)`.
    pub(crate) fn open(rows: usize, cols: usize, topology: Topology) -> Self {
        let matrix = Matrix::weighted(&vec![vec![1; cols]; rows]).unwrap();
        Self::new(GridGraph::new(matrix, topology, Vertex::new(0, 0)).unwrap())
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn reachable_calls(&self) -> usize {
        self.reachable_calls.load(Ordering::SeqCst)
    }

    fn pause(&self) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl Graph for InstrumentedGraph {
    fn root(&self) -> Vertex {
        self.inner.root()
    }

    fn adjacent(&self, v: Vertex) -> Neighbors {
        self.pause();
        self.inner.adjacent(v)
    }

    fn reachable(&self, v: Vertex) -> Neighbors {
        self.reachable_calls.fetch_add(1, Ordering::SeqCst);
        self.pause();
        self.inner.reachable(v)
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.inner.vertices()
    }

    fn edges(&self) -> Vec<Edge> {
        self.inner.edges()
    }

    fn value_at(&self, v: Vertex) -> Option<i64> {
        self.inner.value_at(v)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }
}

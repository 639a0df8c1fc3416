//! Parallel relaxation traversal on the recursive pool.
//!
//! Each task owns one vertex `u` at the distance it was reached with. It
//! relaxes every reachable neighbor under that neighbor's lock and forks a
//! child task for each neighbor whose distance strictly improved. When no
//! more than `branching_threshold` children result, the task keeps walking in
//! place instead of forking.
//!
//! A task never relaxes into a vertex on its own lineage (the chain of
//! relaxations that produced it), so only simple paths are explored and the
//! run terminates even when the grid contains a negative cycle. Without one,
//! no lineage vertex can be improved anyway and the result matches
//! Bellman-Ford.

use std::sync::Arc;

use gridpath_common::types::{Distance, Vertex};
use gridpath_common::utils::error::Result;
use gridpath_common::utils::hash::ConcurrentMap;
use gridpath_core::execution::{DualPoolExecutor, ForkJoinContext, RecursiveTask};
use gridpath_core::graph::{Graph, Neighbors};
use parking_lot::Mutex;

use crate::distance::{DistanceMap, Relaxation, VertexDistanceInfo};
use crate::traits::ShortestPathAlgorithm;

/// Default branching threshold: fork only when two or more neighbors improve.
pub const DEFAULT_BRANCHING_THRESHOLD: usize = 1;

/// Best-effort weighted shortest paths computed by recursive fan-out.
///
/// Unlike [`BellmanFord`](crate::BellmanFord) this never reports a negative
/// cycle. Distances through a cycle are the best found over simple paths.
#[derive(Debug, Clone)]
pub struct ParallelDijkstra {
    executor: Arc<DualPoolExecutor>,
    branching_threshold: usize,
}

impl ParallelDijkstra {
    /// Creates a traversal running on `executor`'s recursive pool.
    #[must_use]
    pub fn new(executor: Arc<DualPoolExecutor>) -> Self {
        Self {
            executor,
            branching_threshold: DEFAULT_BRANCHING_THRESHOLD,
        }
    }

    /// Sets how many improved neighbors a task handles in place before it
    /// forks instead.
    #[must_use]
    pub fn with_branching_threshold(mut self, threshold: usize) -> Self {
        self.branching_threshold = threshold;
        self
    }

    /// The configured branching threshold.
    #[must_use]
    pub fn branching_threshold(&self) -> usize {
        self.branching_threshold
    }
}

impl ShortestPathAlgorithm for ParallelDijkstra {
    fn name(&self) -> &'static str {
        "parallel-dijkstra"
    }

    /// Runs to convergence on the recursive pool. `destination` does not cut
    /// the run short; a task walking in place steps onto it first.
    ///
    /// If the executor is cancelled mid-run, the partial map built so far is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Executor`](gridpath_common::Error::Executor) if the
    /// executor is shut down or a task panicked.
    fn run(&self, graph: &dyn Graph, destination: Option<Vertex>) -> Result<DistanceMap> {
        let root = graph.root();
        tracing::debug!(
            %root,
            threshold = self.branching_threshold,
            "Parallel traversal started"
        );

        let traversal = Traversal::new(graph, destination, self.branching_threshold);
        let seed = RelaxTask {
            traversal: &traversal,
            vertex: root,
            distance: 0,
            lineage: Lineage::start(root),
        };
        self.executor.invoke(seed)?;

        if self.executor.is_cancelled() {
            tracing::warn!("Parallel traversal cancelled; returning partial distances");
        }

        let mut map = traversal.into_distance_map(root);
        let pruned = map.prune_parents(graph);
        tracing::debug!(reached = map.len(), pruned, "Parallel traversal finished");
        Ok(map)
    }
}

/// Chain of vertices from the root to the current task's vertex.
struct Lineage {
    vertex: Vertex,
    prev: Option<Arc<Lineage>>,
}

impl Lineage {
    fn start(root: Vertex) -> Arc<Self> {
        Arc::new(Self {
            vertex: root,
            prev: None,
        })
    }

    fn extend(self: &Arc<Self>, vertex: Vertex) -> Arc<Self> {
        Arc::new(Self {
            vertex,
            prev: Some(Arc::clone(self)),
        })
    }

    fn contains(&self, v: Vertex) -> bool {
        let mut node = Some(self);
        while let Some(n) = node {
            if n.vertex == v {
                return true;
            }
            node = n.prev.as_deref();
        }
        false
    }
}

type Cell = Arc<Mutex<VertexDistanceInfo>>;

/// State shared by every task of one run.
struct Traversal<'g> {
    graph: &'g dyn Graph,
    state: ConcurrentMap<Vertex, Cell>,
    destination: Option<Vertex>,
    threshold: usize,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g dyn Graph, destination: Option<Vertex>, threshold: usize) -> Self {
        let state = ConcurrentMap::default();
        let root = graph.root();
        state.insert(root, Arc::new(Mutex::new(VertexDistanceInfo::source(root))));
        Self {
            graph,
            state,
            destination,
            threshold,
        }
    }

    /// The lock for `v`, created on first visit. The map shard is released
    /// before the caller locks the cell.
    fn cell(&self, v: Vertex) -> Cell {
        if let Some(cell) = self.state.get(&v) {
            return Arc::clone(cell.value());
        }
        let entry = self
            .state
            .entry(v)
            .or_insert_with(|| Arc::new(Mutex::new(VertexDistanceInfo::new(v))));
        Arc::clone(entry.value())
    }

    fn current(&self, v: Vertex) -> Distance {
        let cell = self.state.get(&v).map(|c| Arc::clone(c.value()));
        cell.map_or(Distance::Infinite, |c| c.lock().distance())
    }

    /// Neighbors worth relaxing from `task`, destination last.
    fn candidates(&self, task: &RelaxTask<'_>) -> Vec<(Vertex, Distance)> {
        let base = Distance::Finite(task.distance);
        let mut neighbors: Neighbors = self.graph.reachable(task.vertex);
        if let Some(d) = self.destination
            && let Some(pos) = neighbors.iter().position(|&n| n == d)
        {
            neighbors[pos..].rotate_left(1);
        }
        neighbors
            .into_iter()
            .filter(|&n| !task.lineage.contains(n))
            .filter_map(|n| {
                let candidate = base.add_weight(self.graph.value_at(n)?);
                (candidate <= self.current(n)).then_some((n, candidate))
            })
            .collect()
    }

    /// Relaxes every candidate and returns a task for each strict improvement.
    fn expand<'t>(&self, task: &RelaxTask<'t>) -> Vec<RelaxTask<'t>> {
        let mut next = Vec::new();
        for (n, candidate) in self.candidates(task) {
            let outcome = self.cell(n).lock().relax(task.vertex, candidate);
            if outcome == Relaxation::Improved
                && let Some(distance) = candidate.value()
            {
                next.push(RelaxTask {
                    traversal: task.traversal,
                    vertex: n,
                    distance,
                    lineage: task.lineage.extend(n),
                });
            }
        }
        next
    }

    fn into_distance_map(self, root: Vertex) -> DistanceMap {
        let mut map = DistanceMap::new(root);
        for (_, cell) in self.state {
            let info = Arc::try_unwrap(cell).map_or_else(|c| c.lock().clone(), Mutex::into_inner);
            map.insert(info);
        }
        map
    }
}

/// Explores from one vertex at the distance it was reached with.
struct RelaxTask<'t> {
    traversal: &'t Traversal<'t>,
    vertex: Vertex,
    distance: i64,
    lineage: Arc<Lineage>,
}

impl RelaxTask<'_> {
    /// A newer task owns this vertex once its distance dropped below ours.
    fn is_stale(&self) -> bool {
        self.traversal.current(self.vertex) < Distance::Finite(self.distance)
    }
}

impl RecursiveTask for RelaxTask<'_> {
    type Output = ();

    fn compute(self, ctx: &ForkJoinContext) {
        let mut task = self;
        loop {
            if ctx.is_cancelled() || task.is_stale() {
                return;
            }
            let mut next = task.traversal.expand(&task);
            if next.len() > task.traversal.threshold {
                ctx.invoke_all(next);
                return;
            }
            let Some(last) = next.pop() else {
                return;
            };
            for sibling in next {
                sibling.compute(ctx);
            }
            task = last;
        }
    }
}

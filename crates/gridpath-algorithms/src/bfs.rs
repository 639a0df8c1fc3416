//! Breadth-first search with multi-parent tie tracking.

use std::collections::VecDeque;

use gridpath_common::types::Vertex;
use gridpath_common::utils::error::Result;
use gridpath_core::graph::Graph;

use crate::distance::DistanceMap;
use crate::traits::ShortestPathAlgorithm;

/// Unweighted shortest paths: every reachable step costs one hop.
///
/// Vertices are labelled level by level, so distances come out in
/// non-decreasing order. A vertex reached again at its own level gains the
/// extra predecessor as a parent without being queued twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl ShortestPathAlgorithm for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    /// Runs BFS from the graph root.
    ///
    /// With a `destination`, a step that can land on it goes only there, and
    /// the run stops as soon as the destination is dequeued. The returned map
    /// covers only what was reached by then.
    fn run(&self, graph: &dyn Graph, destination: Option<Vertex>) -> Result<DistanceMap> {
        let root = graph.root();
        tracing::debug!(%root, ?destination, "BFS started");

        let mut map = DistanceMap::new(root);
        let mut queue = VecDeque::from([root]);

        while let Some(u) = queue.pop_front() {
            if destination == Some(u) {
                break;
            }
            let next = map.distance(u).add_weight(1);

            let mut neighbors = graph.reachable(u);
            if let Some(d) = destination
                && neighbors.contains(&d)
            {
                neighbors.clear();
                neighbors.push(d);
            }

            for w in neighbors {
                if map.entry(w).relax(u, next).is_improved() {
                    queue.push_back(w);
                }
            }
        }

        tracing::debug!(reached = map.len(), "BFS finished");
        Ok(map)
    }
}

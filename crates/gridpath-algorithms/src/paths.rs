//! Concrete path sequences: exhaustive enumeration and shortest-path
//! backtracking.

use gridpath_common::types::Vertex;
use gridpath_common::utils::error::{Error, Result};
use gridpath_common::utils::hash::FastSet;
use gridpath_core::execution::CancelFlag;
use gridpath_core::graph::Graph;

use crate::distance::DistanceMap;
use crate::traits::ShortestPathAlgorithm;

/// A path as the vertices it visits, endpoints included.
pub type Path = Vec<Vertex>;

/// Largest grid side accepted by [`PathEnumerator::all_paths`] by default.
pub const DEFAULT_MAX_ENUMERATION_DIM: usize = 50;

/// Turns graphs and distance maps into path lists.
///
/// Both modes backtrack with a per-branch visited set, so no path repeats a
/// vertex and sibling branches never see each other's state. The cancel flag
/// is polled on every step; a cancelled call returns the paths found so far.
#[derive(Debug, Clone)]
pub struct PathEnumerator {
    max_dim: usize,
    cancel: CancelFlag,
}

impl PathEnumerator {
    /// Creates an enumerator observing `cancel`.
    #[must_use]
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            max_dim: DEFAULT_MAX_ENUMERATION_DIM,
            cancel,
        }
    }

    /// Sets the largest grid side [`all_paths`](Self::all_paths) accepts.
    #[must_use]
    pub fn with_max_dim(mut self, max_dim: usize) -> Self {
        self.max_dim = max_dim;
        self
    }

    /// The configured enumeration bound.
    #[must_use]
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    // ========================================================================
    // All simple paths
    // ========================================================================

    /// Every simple path from `from` to `to` over reachable steps.
    ///
    /// Exponential in the worst case, hence the size bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] if either grid side exceeds the bound.
    pub fn all_paths(&self, graph: &dyn Graph, from: Vertex, to: Vertex) -> Result<Vec<Path>> {
        self.check_bounds(graph)?;
        tracing::debug!(%from, %to, "Path enumeration started");

        let mut visited = FastSet::default();
        visited.insert(from);
        let mut path = vec![from];
        let mut out = Vec::new();
        self.extend_simple(graph, to, &mut visited, &mut path, &mut out);

        self.finish("Path enumeration", &out);
        Ok(out)
    }

    /// Fails if `graph` is too large to enumerate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] if either grid side exceeds the bound.
    pub fn check_bounds(&self, graph: &dyn Graph) -> Result<()> {
        let (rows, cols) = graph.dimensions();
        if rows > self.max_dim || cols > self.max_dim {
            return Err(Error::InputTooLarge {
                rows,
                cols,
                max: self.max_dim,
            });
        }
        Ok(())
    }

    fn extend_simple(
        &self,
        graph: &dyn Graph,
        to: Vertex,
        visited: &mut FastSet<Vertex>,
        path: &mut Path,
        out: &mut Vec<Path>,
    ) {
        if self.cancel.is_cancelled() {
            return;
        }
        let Some(&at) = path.last() else {
            return;
        };
        if at == to {
            out.push(path.clone());
            return;
        }
        for n in graph.reachable(at) {
            if visited.insert(n) {
                path.push(n);
                self.extend_simple(graph, to, visited, path, out);
                path.pop();
                visited.remove(&n);
            }
        }
    }

    // ========================================================================
    // All shortest paths
    // ========================================================================

    /// Runs `algorithm` towards `to` and returns every shortest path from the
    /// graph root, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Propagates the algorithm's error, such as [`Error::NegativeCycle`].
    pub fn all_shortest_paths(
        &self,
        graph: &dyn Graph,
        algorithm: &dyn ShortestPathAlgorithm,
        to: Vertex,
    ) -> Result<Vec<Path>> {
        tracing::debug!(algorithm = algorithm.name(), %to, "Shortest path search started");
        let map = algorithm.run(graph, Some(to))?;
        Ok(self.paths_from_parents(&map, to))
    }

    /// Every path from the map's source to `to` through parent links, in
    /// lexicographic order. Empty if `to` was not reached.
    #[must_use]
    pub fn paths_from_parents(&self, map: &DistanceMap, to: Vertex) -> Vec<Path> {
        if !map.contains(to) {
            return Vec::new();
        }
        let mut on_path = FastSet::default();
        on_path.insert(to);
        let mut reversed = vec![to];
        let mut out = Vec::new();
        self.extend_back(map, &mut on_path, &mut reversed, &mut out);

        out.sort();
        self.finish("Parent backtracking", &out);
        out
    }

    fn extend_back(
        &self,
        map: &DistanceMap,
        on_path: &mut FastSet<Vertex>,
        reversed: &mut Path,
        out: &mut Vec<Path>,
    ) {
        if self.cancel.is_cancelled() {
            return;
        }
        let Some(&at) = reversed.last() else {
            return;
        };
        if at == map.source() {
            out.push(reversed.iter().rev().copied().collect());
            return;
        }
        let Some(parents) = map.parents(at) else {
            return;
        };
        for &p in parents {
            if on_path.insert(p) {
                reversed.push(p);
                self.extend_back(map, on_path, reversed, out);
                reversed.pop();
                on_path.remove(&p);
            }
        }
    }

    fn finish(&self, what: &str, out: &[Path]) {
        if self.cancel.is_cancelled() {
            tracing::warn!("{} cancelled after {} paths", what, out.len());
        } else {
            tracing::debug!(paths = out.len(), "{} finished", what);
        }
    }
}

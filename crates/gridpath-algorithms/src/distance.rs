//! Per-vertex traversal state and the map every shortest-path run returns.

use gridpath_common::types::{Distance, Vertex};
use gridpath_common::utils::hash::{FastMap, OrderedSet};
use gridpath_core::graph::Graph;

/// Outcome of offering a candidate distance to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// The candidate was strictly shorter. Parents were reset to the origin.
    Improved,
    /// The candidate tied the current distance and the origin joined the parents.
    TieAdded,
    /// Nothing changed.
    Unchanged,
}

impl Relaxation {
    /// Returns true if the vertex got a strictly shorter distance.
    #[inline]
    #[must_use]
    pub fn is_improved(self) -> bool {
        matches!(self, Self::Improved)
    }
}

/// Distance and parents of one vertex during a single traversal.
///
/// Every parent `p` satisfies `distance(p) + weight(p -> vertex) == distance`
/// once the traversal is stable. Parents keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexDistanceInfo {
    vertex: Vertex,
    distance: Distance,
    parents: OrderedSet<Vertex>,
}

impl VertexDistanceInfo {
    /// An unreached vertex.
    #[must_use]
    pub fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            distance: Distance::Infinite,
            parents: OrderedSet::default(),
        }
    }

    /// The traversal source, at distance zero with no parents.
    #[must_use]
    pub fn source(vertex: Vertex) -> Self {
        Self {
            distance: Distance::ZERO,
            ..Self::new(vertex)
        }
    }

    /// The vertex this record describes.
    #[must_use]
    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    /// Current best distance.
    #[must_use]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Predecessors through which `distance` is achieved.
    #[must_use]
    pub fn parents(&self) -> &OrderedSet<Vertex> {
        &self.parents
    }

    /// Offers `candidate` as the distance to this vertex via `from`.
    ///
    /// A strictly shorter candidate replaces the distance and reseeds the
    /// parents with `from`. An equal one adds `from` to the parents unless it
    /// is already there.
    pub fn relax(&mut self, from: Vertex, candidate: Distance) -> Relaxation {
        if !candidate.is_finite() {
            return Relaxation::Unchanged;
        }
        if candidate < self.distance {
            self.distance = candidate;
            self.parents.clear();
            self.parents.insert(from);
            Relaxation::Improved
        } else if candidate == self.distance && self.parents.insert(from) {
            Relaxation::TieAdded
        } else {
            Relaxation::Unchanged
        }
    }
}

/// Distances and parents reached by one traversal, keyed by vertex.
///
/// Covers only the vertices the run actually reached; anything else reads as
/// [`Distance::Infinite`].
#[derive(Debug, Clone)]
pub struct DistanceMap {
    source: Vertex,
    entries: FastMap<Vertex, VertexDistanceInfo>,
}

impl DistanceMap {
    /// A map holding only `source` at distance zero.
    #[must_use]
    pub fn new(source: Vertex) -> Self {
        let mut entries = FastMap::default();
        entries.insert(source, VertexDistanceInfo::source(source));
        Self { source, entries }
    }

    /// The vertex the traversal started from.
    #[must_use]
    pub fn source(&self) -> Vertex {
        self.source
    }

    /// The record for `v`, if the run reached it.
    #[must_use]
    pub fn get(&self, v: Vertex) -> Option<&VertexDistanceInfo> {
        self.entries.get(&v)
    }

    /// Distance to `v`, infinite if unreached.
    #[must_use]
    pub fn distance(&self, v: Vertex) -> Distance {
        self.entries
            .get(&v)
            .map_or(Distance::Infinite, VertexDistanceInfo::distance)
    }

    /// Parents of `v`, if the run reached it.
    #[must_use]
    pub fn parents(&self, v: Vertex) -> Option<&OrderedSet<Vertex>> {
        self.entries.get(&v).map(VertexDistanceInfo::parents)
    }

    /// Returns true if `v` was reached.
    #[must_use]
    pub fn contains(&self, v: Vertex) -> bool {
        self.entries
            .get(&v)
            .is_some_and(|info| info.distance.is_finite())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &VertexDistanceInfo> {
        self.entries.values()
    }

    /// Reached vertices in ascending order.
    #[must_use]
    pub fn reached(&self) -> Vec<Vertex> {
        let mut reached: Vec<Vertex> = self
            .entries
            .values()
            .filter(|info| info.distance.is_finite())
            .map(VertexDistanceInfo::vertex)
            .collect();
        reached.sort_unstable();
        reached
    }

    /// The record for `v`, created unreached on first access.
    pub(crate) fn entry(&mut self, v: Vertex) -> &mut VertexDistanceInfo {
        self.entries
            .entry(v)
            .or_insert_with(|| VertexDistanceInfo::new(v))
    }

    pub(crate) fn insert(&mut self, info: VertexDistanceInfo) {
        self.entries.insert(info.vertex, info);
    }

    /// Removes every parent `p` of `v` with `distance(p) + weight(v) != distance(v)`.
    ///
    /// Returns the number of parents removed.
    pub(crate) fn prune_parents(&mut self, graph: &dyn Graph) -> usize {
        let distances: FastMap<Vertex, Distance> = self
            .entries
            .iter()
            .map(|(v, info)| (*v, info.distance))
            .collect();
        let mut removed = 0;
        for info in self.entries.values_mut() {
            let Some(weight) = graph.value_at(info.vertex) else {
                removed += info.parents.len();
                info.parents.clear();
                continue;
            };
            let target = info.distance;
            let before = info.parents.len();
            info.parents.retain(|p| {
                distances
                    .get(p)
                    .is_some_and(|d| d.is_finite() && d.add_weight(weight) == target)
            });
            removed += before - info.parents.len();
        }
        removed
    }
}

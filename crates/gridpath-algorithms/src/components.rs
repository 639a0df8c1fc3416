//! Connected components with a shared component memo.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use gridpath_common::types::Vertex;
use gridpath_common::utils::error::{ExecutorError, Result};
use gridpath_common::utils::hash::{ConcurrentMap, ConcurrentSet, FastMap, FastSet};
use gridpath_core::execution::{CancelFlag, DualPoolExecutor};
use gridpath_core::graph::Graph;

/// Vertices mutually reachable over value-bearing steps.
pub type Component = BTreeSet<Vertex>;

/// Finds connected components, remembering every component it builds.
///
/// The memo maps each assigned vertex to its component and is shared by all
/// clones, so later calls on overlapping parts of one grid reuse what earlier
/// calls built, and a [`sweep`](Self::sweep) expands each vertex once. The
/// memo assumes every call sees the same grid; call [`clear`](Self::clear)
/// before reusing a finder on another one.
#[derive(Debug, Clone, Default)]
pub struct ComponentFinder {
    memo: Arc<ConcurrentMap<Vertex, Arc<Component>>>,
}

impl ComponentFinder {
    /// Creates a finder with an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Components of the region around the graph root.
    ///
    /// See [`find_from`](Self::find_from).
    pub fn find(&self, graph: &dyn Graph, cancel: &CancelFlag) -> Vec<Component> {
        self.find_from(graph, graph.root(), cancel)
    }

    /// Components covering every value-bearing vertex in the region adjacent
    /// to `seed`, ascending by size.
    ///
    /// The region is everything connected to `seed` by adjacency, values
    /// ignored. Under the diagonal topology that is one parity class of the
    /// grid; under the others it is the whole grid. Components are then built
    /// over `reachable` steps, reusing memoized ones.
    ///
    /// Returns an empty list if `cancel` is raised mid-call. Nothing partial
    /// is memoized.
    pub fn find_from(
        &self,
        graph: &dyn Graph,
        seed: Vertex,
        cancel: &CancelFlag,
    ) -> Vec<Component> {
        tracing::debug!(%seed, "Component search started");

        let mut region = FastSet::default();
        region.insert(seed);
        let mut stack = vec![seed];
        while let Some(u) = stack.pop() {
            if cancel.is_cancelled() {
                tracing::warn!("Component search cancelled");
                return Vec::new();
            }
            for n in graph.adjacent(u) {
                if region.insert(n) {
                    stack.push(n);
                }
            }
        }

        let mut seeds: Vec<Vertex> = region
            .into_iter()
            .filter(|&v| graph.has_value(v))
            .collect();
        seeds.sort_unstable();

        let mut found = BTreeMap::new();
        for v in seeds {
            let Some(component) = self.component_of(graph, v, cancel) else {
                tracing::warn!("Component search cancelled");
                return Vec::new();
            };
            if let Some(&first) = component.first() {
                found.entry(first).or_insert(component);
            }
        }

        let components = sorted(found);
        tracing::debug!(components = components.len(), "Component search finished");
        components
    }

    /// Partitions every value-bearing vertex of the graph with concurrent
    /// general-pool tasks.
    ///
    /// Every task claims the vertices it reaches, so each vertex is expanded
    /// by exactly one task. A task stopping at a vertex claimed by another
    /// task records the contact, and fragments in contact are merged into
    /// components once all tasks finish. Seeds already memoized or claimed
    /// are skipped.
    ///
    /// A cancelled sweep returns the partial fragments it has and memoizes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Executor`](gridpath_common::Error::Executor) if the
    /// executor refuses the tasks or one of them panicked.
    pub fn sweep<G: Graph + 'static>(
        &self,
        graph: &Arc<G>,
        executor: &DualPoolExecutor,
    ) -> Result<Vec<Component>> {
        let vertices = graph.vertices();
        tracing::debug!(vertices = vertices.len(), "Component sweep started");

        let claims: Arc<ConcurrentMap<Vertex, usize>> = Arc::default();
        let contacts: Arc<ConcurrentSet<(usize, usize)>> = Arc::default();
        let mut handles = Vec::new();
        for (id, &seed) in vertices.iter().enumerate() {
            if self.memo.contains_key(&seed) || claims.contains_key(&seed) {
                continue;
            }
            let task = SweepTask {
                id,
                seed,
                graph: Arc::clone(graph),
                claims: Arc::clone(&claims),
                contacts: Arc::clone(&contacts),
                cancel: executor.cancel_flag(),
            };
            handles.push(executor.submit(move || task.explore())?);
        }

        let mut fragments = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(Some(fragment)) => fragments.push(fragment),
                Ok(None) | Err(ExecutorError::Cancelled) => {}
                Err(e) => return Err(e.into()),
            }
        }
        let merged = merge_fragments(fragments, &contacts);

        if executor.is_cancelled() {
            tracing::warn!(
                fragments = merged.len(),
                "Component sweep cancelled; returning partial components"
            );
            let mut components = merged;
            components.sort_by(by_size);
            return Ok(components);
        }

        for component in merged {
            self.publish(component);
        }
        let mut found = BTreeMap::new();
        for v in vertices {
            let component = self.memo.get(&v).map(|c| Arc::clone(c.value()));
            if let Some(component) = component
                && let Some(&first) = component.first()
            {
                found.entry(first).or_insert(component);
            }
        }

        let components = sorted(found);
        tracing::debug!(
            components = components.len(),
            claimed = claims.len(),
            "Component sweep finished"
        );
        Ok(components)
    }

    /// Number of vertices currently assigned to a component.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    /// Forgets every memoized component.
    pub fn clear(&self) {
        self.memo.clear();
    }

    /// The component containing `v`, built and memoized if unknown.
    ///
    /// `None` only when cancelled.
    fn component_of(
        &self,
        graph: &dyn Graph,
        v: Vertex,
        cancel: &CancelFlag,
    ) -> Option<Arc<Component>> {
        if let Some(known) = self.memo.get(&v) {
            return Some(Arc::clone(known.value()));
        }

        let mut component = Component::new();
        component.insert(v);
        let mut stack = vec![v];
        while let Some(u) = stack.pop() {
            if cancel.is_cancelled() {
                return None;
            }
            for n in graph.reachable(u) {
                if component.insert(n) {
                    stack.push(n);
                }
            }
        }

        Some(self.publish(component))
    }

    /// Memoizes a finished component under each of its vertices.
    fn publish(&self, component: Component) -> Arc<Component> {
        let component = Arc::new(component);
        for &u in component.iter() {
            self.memo.entry(u).or_insert_with(|| Arc::clone(&component));
        }
        component
    }
}

/// One sweep task: a DFS from `seed` over vertices no other task claimed.
struct SweepTask<G> {
    id: usize,
    seed: Vertex,
    graph: Arc<G>,
    claims: Arc<ConcurrentMap<Vertex, usize>>,
    contacts: Arc<ConcurrentSet<(usize, usize)>>,
    cancel: CancelFlag,
}

impl<G: Graph> SweepTask<G> {
    /// The fragment this task claimed, or `None` if the seed was taken or
    /// the executor was cancelled.
    fn explore(&self) -> Option<(usize, Component)> {
        if self.claim(self.seed) != self.id {
            return None;
        }
        let mut fragment = Component::from([self.seed]);
        let mut stack = vec![self.seed];
        while let Some(u) = stack.pop() {
            if self.cancel.is_cancelled() {
                return None;
            }
            for n in self.graph.reachable(u) {
                let owner = self.claim(n);
                if owner != self.id {
                    self.contacts.insert((self.id.min(owner), self.id.max(owner)));
                } else if fragment.insert(n) {
                    stack.push(n);
                }
            }
        }
        Some((self.id, fragment))
    }

    /// Claims `v` unless taken, returning its owner.
    fn claim(&self, v: Vertex) -> usize {
        *self.claims.entry(v).or_insert(self.id)
    }
}

/// Unions fragments that touched each other.
fn merge_fragments(
    fragments: Vec<(usize, Component)>,
    contacts: &ConcurrentSet<(usize, usize)>,
) -> Vec<Component> {
    let index: FastMap<usize, usize> = fragments
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (*id, i))
        .collect();
    let mut parent: Vec<usize> = (0..fragments.len()).collect();
    for contact in contacts.iter() {
        let (a, b) = *contact;
        if let (Some(&a), Some(&b)) = (index.get(&a), index.get(&b)) {
            let (ra, rb) = (find_root(&mut parent, a), find_root(&mut parent, b));
            parent[ra.max(rb)] = ra.min(rb);
        }
    }

    let mut merged: BTreeMap<usize, Component> = BTreeMap::new();
    for (i, (_, fragment)) in fragments.into_iter().enumerate() {
        let root = find_root(&mut parent, i);
        merged.entry(root).or_default().extend(fragment);
    }
    merged.into_values().collect()
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Ascending by size, ties by smallest vertex.
fn by_size(a: &Component, b: &Component) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.first().cmp(&b.first()))
}

fn sorted(found: BTreeMap<Vertex, Arc<Component>>) -> Vec<Component> {
    let mut components: Vec<Component> = found.into_values().map(Arc::unwrap_or_clone).collect();
    components.sort_by(by_size);
    components
}

//! Bellman-Ford with negative-cycle detection.

use gridpath_common::types::{Edge, Vertex};
use gridpath_common::utils::error::{Error, Result};
use gridpath_core::graph::Graph;

use crate::distance::{DistanceMap, Relaxation};
use crate::traits::ShortestPathAlgorithm;

/// Weighted shortest paths that tolerate negative weights.
///
/// The weight of an edge is the value of the cell it enters. A negative cycle
/// reachable from the root fails the run with [`Error::NegativeCycle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFord;

impl ShortestPathAlgorithm for BellmanFord {
    fn name(&self) -> &'static str {
        "bellman-ford"
    }

    /// Runs up to `|V| - 1` relaxation rounds over every edge, then one check
    /// round. `destination` is ignored: the cycle check needs the full graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeCycle`] if the check round still finds a
    /// strictly shorter distance.
    fn run(&self, graph: &dyn Graph, _destination: Option<Vertex>) -> Result<DistanceMap> {
        let root = graph.root();
        let edges: Vec<_> = graph
            .edges()
            .into_iter()
            .filter_map(|e| graph.value_at(e.to).map(|w| (e, w)))
            .collect();
        let rounds = graph.vertex_count().saturating_sub(1);
        tracing::debug!(%root, edges = edges.len(), rounds, "Bellman-Ford started");

        let mut map = DistanceMap::new(root);
        let mut performed = 0;
        for _ in 0..rounds {
            performed += 1;
            let mut improved = false;
            for &(edge, weight) in &edges {
                improved |= relax_edge(&mut map, edge, weight).is_improved();
            }
            if !improved {
                break;
            }
        }

        // Check round. Distances are final here unless a negative cycle
        // exists; ties missed because a parent settled late are picked up.
        for &(edge, weight) in &edges {
            if relax_edge(&mut map, edge, weight).is_improved() {
                tracing::debug!(edge = %edge.to, "Bellman-Ford found a negative cycle");
                return Err(Error::NegativeCycle);
            }
        }

        let pruned = map.prune_parents(graph);
        let tied = map.iter().filter(|info| info.parents().len() > 1).count();
        tracing::debug!(
            reached = map.len(),
            rounds = performed,
            pruned,
            tied,
            "Bellman-Ford finished"
        );
        Ok(map)
    }
}

/// Offers `edge.from`'s distance plus `weight` to `edge.to`.
///
/// The source keeps an empty parent set: a tie into it, as on a zero-weight
/// cycle, is ignored. Only a strict improvement (a negative cycle) counts.
fn relax_edge(map: &mut DistanceMap, edge: Edge, weight: i64) -> Relaxation {
    let from = map.distance(edge.from);
    if !from.is_finite() {
        return Relaxation::Unchanged;
    }
    let candidate = from.add_weight(weight);
    if edge.to == map.source() && candidate >= map.distance(edge.to) {
        return Relaxation::Unchanged;
    }
    map.entry(edge.to).relax(edge.from, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_common::types::Distance;
    use gridpath_core::graph::{GridGraph, Matrix, Topology};

    fn v(r: usize, c: usize) -> Vertex {
        Vertex::new(r, c)
    }

    fn weighted(cells: &[Vec<i64>], root: Vertex) -> GridGraph {
        GridGraph::new(Matrix::weighted(cells).unwrap(), Topology::Cross, root).unwrap()
    }

    #[test]
    fn test_weighted_detour() {
        let graph = weighted(&[vec![100, 100, 100], vec![500, 900, 300]], v(1, 0));
        let map = BellmanFord.run(&graph, Some(v(1, 2))).unwrap();
        assert_eq!(map.distance(v(1, 2)), Distance::Finite(600));
        let parents: Vec<_> = map.parents(v(1, 2)).unwrap().iter().copied().collect();
        assert_eq!(parents, vec![v(0, 2)]);
        assert_eq!(map.distance(v(1, 1)), Distance::Finite(900));
    }

    #[test]
    fn test_ties_across_rounds() {
        let graph = weighted(&[vec![1, 1], vec![1, 1]], v(0, 0));
        let map = BellmanFord.run(&graph, None).unwrap();
        assert_eq!(map.distance(v(1, 1)), Distance::Finite(2));
        assert_eq!(map.parents(v(1, 1)).unwrap().len(), 2);
    }

    #[test]
    fn test_negative_edge_without_cycle() {
        // Entering (0, 1) costs -3, but leaving it back is +5.
        let graph = weighted(&[vec![5, -3, 4]], v(0, 0));
        let map = BellmanFord.run(&graph, None).unwrap();
        assert_eq!(map.distance(v(0, 1)), Distance::Finite(-3));
        assert_eq!(map.distance(v(0, 2)), Distance::Finite(1));
    }

    #[test]
    fn test_negative_cycle_is_refused() {
        // (0, 0) <-> (0, 1) costs 1 + -2 per lap.
        let graph = weighted(&[vec![1, -2]], v(0, 0));
        assert_eq!(
            BellmanFord.run(&graph, None).unwrap_err(),
            Error::NegativeCycle
        );
    }

    #[test]
    fn test_zero_weight_cycle_leaves_source_parentless() {
        let graph = weighted(&[vec![0, 0], vec![0, 0]], v(0, 0));
        let map = BellmanFord.run(&graph, None).unwrap();
        assert_eq!(map.distance(v(0, 0)), Distance::ZERO);
        assert!(map.parents(v(0, 0)).unwrap().is_empty());
        assert_eq!(map.distance(v(1, 1)), Distance::ZERO);
        assert_eq!(map.parents(v(1, 1)).unwrap().len(), 2);
    }

    #[test]
    fn test_unreachable_cells_stay_infinite() {
        let cells = vec![vec![Some(1), None, Some(1)]];
        let graph = GridGraph::new(
            Matrix::weighted_sparse(&cells).unwrap(),
            Topology::Cross,
            v(0, 0),
        )
        .unwrap();
        let map = BellmanFord.run(&graph, None).unwrap();
        assert_eq!(map.distance(v(0, 2)), Distance::Infinite);
        assert_eq!(map.reached(), vec![v(0, 0)]);
    }
}

//! Property tests: engine queries against brute-force references on small
//! random grids.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use gridpath_algorithms::WeightedAlgorithm;
use gridpath_common::{Distance, Error, Vertex};
use gridpath_core::execution::ExecutorConfig;
use gridpath_core::graph::{Graph, GridGraph, Matrix, Topology};
use gridpath_engine::{Config, GridPathEngine};
use proptest::collection::vec;
use proptest::prelude::*;

fn engine() -> &'static GridPathEngine {
    static ENGINE: OnceLock<GridPathEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        GridPathEngine::with_config(
            Config::default().with_executor(
                ExecutorConfig::default()
                    .with_general_multiplier(1)
                    .with_recursive_threads(4),
            ),
        )
        .unwrap()
    })
}

fn topology() -> impl Strategy<Value = Topology> {
    prop_oneof![
        Just(Topology::Cross),
        Just(Topology::Diagonal),
        Just(Topology::Regular),
    ]
}

/// Grids up to `max` on a side whose cells are either empty or carry a
/// weight from `weights`.
fn weighted_grid(
    max: usize,
    weights: std::ops::RangeInclusive<i64>,
) -> impl Strategy<Value = GridGraph> {
    (1..=max, 1..=max, topology()).prop_flat_map(move |(rows, cols, topology)| {
        let cell = prop_oneof![1 => Just(None::<i64>), 3 => weights.clone().prop_map(Some)];
        vec(vec(cell, cols), rows).prop_filter_map("needs a value-bearing cell", move |cells| {
            let matrix = Matrix::weighted_sparse(&cells).ok()?;
            GridGraph::with_first_root(matrix, topology).ok()
        })
    })
}

fn binary_grid(max: usize) -> impl Strategy<Value = GridGraph> {
    (1..=max, 1..=max, topology()).prop_flat_map(move |(rows, cols, topology)| {
        let cells = vec(vec(prop_oneof![1 => Just(0i64), 3 => Just(1i64)], cols), rows);
        cells.prop_filter_map("needs a value-bearing cell", move |cells| {
            let matrix = Matrix::binary(&cells).ok()?;
            GridGraph::with_first_root(matrix, topology).ok()
        })
    })
}

/// Relaxes every edge until nothing changes. Weights must be positive.
fn reference_distances(graph: &dyn Graph, hop: bool) -> BTreeMap<Vertex, i64> {
    let mut dist = BTreeMap::from([(graph.root(), 0)]);
    let edges = graph.edges();
    loop {
        let mut changed = false;
        for e in &edges {
            let Some(&d) = dist.get(&e.from) else {
                continue;
            };
            let w = if hop { 1 } else { graph.value_at(e.to).unwrap() };
            let candidate = d + w;
            if dist.get(&e.to).is_none_or(|&cur| candidate < cur) {
                dist.insert(e.to, candidate);
                changed = true;
            }
        }
        if !changed {
            return dist;
        }
    }
}

/// Cheapest simple path from the root to every reachable vertex, found by
/// enumerating them all. Any weights; grids must be tiny.
fn simple_path_distances(graph: &dyn Graph) -> BTreeMap<Vertex, i64> {
    fn walk(
        graph: &dyn Graph,
        at: Vertex,
        cost: i64,
        on_path: &mut BTreeSet<Vertex>,
        best: &mut BTreeMap<Vertex, i64>,
    ) {
        best.entry(at)
            .and_modify(|b| *b = (*b).min(cost))
            .or_insert(cost);
        for n in graph.reachable(at) {
            if on_path.insert(n) {
                walk(graph, n, cost + graph.value_at(n).unwrap(), on_path, best);
                on_path.remove(&n);
            }
        }
    }

    let root = graph.root();
    let mut best = BTreeMap::new();
    walk(graph, root, 0, &mut BTreeSet::from([root]), &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hop_distances_match_reference(graph in binary_grid(5)) {
        let map = engine().hop_distances(&graph).unwrap();
        let expected = reference_distances(&graph, true);

        prop_assert_eq!(map.reached(), expected.keys().copied().collect::<Vec<_>>());
        for (&vertex, &d) in &expected {
            prop_assert_eq!(map.distance(vertex), Distance::Finite(d));

            let parents: BTreeSet<Vertex> =
                map.parents(vertex).unwrap().iter().copied().collect();
            let expected_parents: BTreeSet<Vertex> = expected
                .iter()
                .filter(|&(&u, &du)| du + 1 == d && graph.reachable(u).contains(&vertex))
                .map(|(&u, _)| u)
                .collect();
            prop_assert_eq!(parents, expected_parents);
        }
    }

    #[test]
    fn bellman_ford_matches_reference(graph in weighted_grid(3, 1..=9)) {
        let map = engine()
            .distances(&graph, WeightedAlgorithm::BellmanFord)
            .unwrap();
        let expected = reference_distances(&graph, false);
        prop_assert_eq!(map.reached(), expected.keys().copied().collect::<Vec<_>>());
        for (&vertex, &d) in &expected {
            prop_assert_eq!(map.distance(vertex), Distance::Finite(d));
        }
    }

    #[test]
    fn parallel_matches_bellman_ford(graph in weighted_grid(5, 1..=9)) {
        let exact = engine()
            .distances(&graph, WeightedAlgorithm::BellmanFord)
            .unwrap();
        let parallel = engine()
            .distances(&graph, WeightedAlgorithm::ParallelDijkstra)
            .unwrap();
        prop_assert_eq!(parallel.reached(), exact.reached());
        for vertex in exact.reached() {
            prop_assert_eq!(parallel.distance(vertex), exact.distance(vertex));
        }
    }

    #[test]
    fn signed_weights_match_simple_path_minimum(graph in weighted_grid(3, -9..=9)) {
        let simple = simple_path_distances(&graph);
        let parallel = engine()
            .distances(&graph, WeightedAlgorithm::ParallelDijkstra)
            .unwrap();

        match engine().distances(&graph, WeightedAlgorithm::BellmanFord) {
            Ok(exact) => {
                prop_assert_eq!(exact.reached(), simple.keys().copied().collect::<Vec<_>>());
                for (&vertex, &d) in &simple {
                    prop_assert_eq!(exact.distance(vertex), Distance::Finite(d));
                    prop_assert_eq!(parallel.distance(vertex), Distance::Finite(d));
                }
                prop_assert_eq!(parallel.reached(), exact.reached());
            }
            Err(Error::NegativeCycle) => {
                // Every reported distance is the cost of some simple path.
                for vertex in parallel.reached() {
                    let Distance::Finite(d) = parallel.distance(vertex) else {
                        return Err(TestCaseError::fail("reached vertex without a distance"));
                    };
                    prop_assert!(simple.get(&vertex).is_some_and(|&best| d >= best));
                }
            }
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }
    }

    #[test]
    fn sweep_partitions_value_bearing_vertices(graph in binary_grid(5)) {
        let graph = Arc::new(graph);
        let components = engine().connected_components_all(&graph).unwrap();

        let mut seen = BTreeSet::new();
        for component in &components {
            prop_assert!(!component.is_empty());
            for &v in component {
                prop_assert!(seen.insert(v));
            }
        }
        prop_assert_eq!(seen, graph.vertices().into_iter().collect::<BTreeSet<_>>());
        prop_assert!(components.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    #[test]
    fn shortest_paths_are_valid_and_minimal(graph in weighted_grid(4, 1..=9)) {
        let destination = *graph.vertices().last().unwrap();
        let paths = engine()
            .shortest_paths_weighted(&graph, destination, WeightedAlgorithm::BellmanFord)
            .unwrap();
        let expected = reference_distances(&graph, false);

        prop_assert_eq!(paths.is_empty(), !expected.contains_key(&destination));
        for path in &paths {
            prop_assert_eq!(path.first(), Some(&graph.root()));
            prop_assert_eq!(path.last(), Some(&destination));
            let cost: i64 = path[1..].iter().map(|&v| graph.value_at(v).unwrap()).sum();
            prop_assert_eq!(Some(&cost), expected.get(&destination));
            for step in path.windows(2) {
                prop_assert!(graph.reachable(step[0]).contains(&step[1]));
            }
        }
    }

    #[test]
    fn all_paths_are_simple(graph in binary_grid(3)) {
        let destination = *graph.vertices().last().unwrap();
        let paths = engine().all_paths(&graph, destination).unwrap();
        let reached = reference_distances(&graph, true).contains_key(&destination);
        prop_assert_eq!(paths.is_empty(), !reached);
        for path in &paths {
            let unique: BTreeSet<_> = path.iter().collect();
            prop_assert_eq!(unique.len(), path.len());
            for step in path.windows(2) {
                prop_assert!(graph.reachable(step[0]).contains(&step[1]));
            }
        }
    }
}

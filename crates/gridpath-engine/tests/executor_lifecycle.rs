//! Shutdown and cancellation as seen through the engine.

use std::sync::Arc;
use std::time::Duration;

use gridpath_algorithms::WeightedAlgorithm;
use gridpath_common::{Error, ErrorCategory, ExecutorError, Vertex};
use gridpath_core::execution::ExecutorConfig;
use gridpath_core::graph::{GridGraph, Matrix, Topology};
use gridpath_engine::{Config, GridPathEngine};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn engine() -> GridPathEngine {
    init_tracing();
    GridPathEngine::with_config(
        Config::default().with_executor(
            ExecutorConfig::default()
                .with_general_multiplier(1)
                .with_recursive_threads(2),
        ),
    )
    .unwrap()
}

fn open_grid(side: usize, topology: Topology) -> Arc<GridGraph> {
    let matrix = Matrix::weighted(&vec![vec![1; side]; side]).unwrap();
    Arc::new(GridGraph::new(matrix, topology, Vertex::new(0, 0)).unwrap())
}

#[test]
fn fresh_engine_accepts_work() {
    let engine = engine();
    let graph = open_grid(4, Topology::Regular);
    assert!(!engine.is_cancelled());
    assert_eq!(engine.connected_components_all(&graph).unwrap().len(), 1);
    assert!(engine.await_termination(Duration::from_secs(5)));

    let stats = engine.executor().stats();
    assert_eq!(stats.submitted, stats.completed);
    assert_eq!(stats.panicked, 0);
}

#[test]
fn graceful_shutdown_refuses_new_parallel_work() {
    let engine = engine();
    let graph = open_grid(3, Topology::Cross);
    engine.shutdown();
    assert!(!engine.is_cancelled());

    let err = engine.connected_components_all(&graph).unwrap_err();
    assert_eq!(err, Error::Executor(ExecutorError::Shutdown));
    assert_eq!(err.category(), ErrorCategory::Internal);

    let err = engine
        .distances(graph.as_ref(), WeightedAlgorithm::ParallelDijkstra)
        .unwrap_err();
    assert_eq!(err, Error::Executor(ExecutorError::Shutdown));

    // Single-threaded queries do not touch the pools.
    let paths = engine.shortest_paths(graph.as_ref(), Vertex::new(2, 2)).unwrap();
    assert_eq!(paths.len(), 6);
    assert!(engine.await_termination(Duration::from_secs(1)));
}

#[test]
fn shutdown_now_cancels_cooperative_loops() {
    let engine = engine();
    let graph = open_grid(5, Topology::Cross);
    let pending = engine.shutdown_now();
    assert!(pending.is_empty());
    assert!(engine.is_cancelled());

    assert!(engine.connected_components(graph.as_ref()).is_empty());
    assert!(engine.all_paths(graph.as_ref(), Vertex::new(4, 4)).unwrap().is_empty());
    assert!(
        engine
            .shortest_paths(graph.as_ref(), Vertex::new(4, 4))
            .unwrap()
            .is_empty()
    );
    assert!(engine.await_termination(Duration::from_secs(1)));
}

#[test]
fn panicking_task_is_reported_not_fatal() {
    let engine = engine();
    let handle = engine
        .executor()
        .submit(|| -> usize { panic!("worker blew up") })
        .unwrap();
    assert_eq!(
        handle.join(),
        Err(ExecutorError::TaskPanicked("worker blew up".to_string()))
    );

    let graph = open_grid(3, Topology::Regular);
    assert_eq!(engine.connected_components_all(&graph).unwrap().len(), 1);
    assert_eq!(engine.executor().stats().panicked, 1);
}

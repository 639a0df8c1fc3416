//! Benchmarks for the shortest-path algorithms.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use gridpath_algorithms::{
    BellmanFord, Bfs, ComponentFinder, ParallelDijkstra, ShortestPathAlgorithm,
};
use gridpath_common::Vertex;
use gridpath_core::{CancelFlag, DualPoolExecutor, GridGraph, Matrix, Topology};

fn generate_weights(side: usize, seed: u64) -> Vec<Vec<i64>> {
    // Simple deterministic pseudo-random generator
    let mut state = seed;
    (0..side)
        .map(|_| {
            (0..side)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                    ((state >> 33) % 9 + 1) as i64
                })
                .collect()
        })
        .collect()
}

fn weighted_grid(side: usize, topology: Topology) -> GridGraph {
    let matrix = Matrix::weighted(&generate_weights(side, 42)).expect("valid grid");
    GridGraph::new(matrix, topology, Vertex::new(0, 0)).expect("root has a value")
}

fn bench_bfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs");
    for &side in &[16, 64, 128] {
        let graph = weighted_grid(side, Topology::Regular);
        group.bench_with_input(BenchmarkId::new("regular", side), &graph, |b, graph| {
            b.iter(|| black_box(Bfs.run(graph, None)));
        });
    }
    group.finish();
}

fn bench_weighted(c: &mut Criterion) {
    let executor = Arc::new(DualPoolExecutor::with_defaults().expect("executor"));
    let parallel = ParallelDijkstra::new(Arc::clone(&executor));

    let mut group = c.benchmark_group("weighted");
    group.sample_size(20);
    for &side in &[8, 16, 32] {
        let graph = weighted_grid(side, Topology::Cross);
        group.bench_with_input(BenchmarkId::new("bellman_ford", side), &graph, |b, graph| {
            b.iter(|| black_box(BellmanFord.run(graph, None)));
        });
        group.bench_with_input(BenchmarkId::new("parallel", side), &graph, |b, graph| {
            b.iter(|| black_box(parallel.run(graph, None)));
        });
    }
    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let graph = weighted_grid(64, Topology::Diagonal);
    c.bench_function("components_diagonal_64", |b| {
        b.iter(|| black_box(ComponentFinder::new().find(&graph, &CancelFlag::new())));
    });
}

criterion_group!(benches, bench_bfs, bench_weighted, bench_components);

criterion_main!(benches);

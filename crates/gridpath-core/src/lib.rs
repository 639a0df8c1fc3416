//! # gridpath-core
//!
//! Core layer for Gridpath: the grid graph model and the execution primitives
//! the algorithms run on.
//!
//! This crate depends only on `gridpath-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Graph trait, neighbor topologies, backing matrix, grid view
//! - [`execution`] - Dual-pool executor, recursive tasks, cancellation

pub mod execution;
pub mod graph;

// Re-export commonly used types
pub use execution::{
    CancelFlag, DualPoolExecutor, ExecutorConfig, ExecutorStats, ForkJoinContext, PendingTask,
    RecursiveTask, TaskHandle,
};
pub use graph::{Graph, GridGraph, Matrix, MatrixKind, Neighbors, Topology};

//! Error types for Gridpath.
//!
//! Algorithm errors are never retried internally. They travel to the caller
//! as distinct variants, and [`Error::category`] folds them into the three
//! outcomes a protocol layer has to tell apart.

use thiserror::Error;

use crate::types::Vertex;

/// Result type alias for Gridpath operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Gridpath operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A binary grid was given a value other than 0 or 1.
    #[error("invalid value {value} at {vertex}: binary grids accept only 0 or 1")]
    InvalidValue {
        /// Cell that was being written.
        vertex: Vertex,
        /// Rejected value.
        value: i64,
    },

    /// Path enumeration requested on a grid above the supported bound.
    #[error("input too large: {rows}x{cols} grid exceeds the {max}x{max} enumeration limit")]
    InputTooLarge {
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
        /// Largest accepted dimension.
        max: usize,
    },

    /// Bellman-Ford found a negative cycle reachable from the root.
    #[error("negative cycle reachable from the root: shortest paths are undefined")]
    NegativeCycle,

    /// A coordinate outside the grid was used where a cell is required.
    #[error("vertex {0} is outside the grid")]
    OutOfBounds(Vertex),

    /// Grid rows of unequal length.
    #[error("row {row} has {found} columns, expected {expected}")]
    InvalidShape {
        /// Offending row index.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// The grid has no value-bearing cell to root a graph at.
    #[error("graph not ready: the grid has no value-bearing cell")]
    EmptyGraph,

    /// A root or endpoint refers to an empty cell.
    #[error("graph not ready: vertex {0} carries no value")]
    NoValueAt(Vertex),

    /// Executor failure.
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Executor failures surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor no longer accepts work.
    #[error("executor is shut down")]
    Shutdown,

    /// The task was discarded before it ran.
    #[error("task was cancelled before completion")]
    Cancelled,

    /// The task panicked. The payload message is kept for diagnostics.
    #[error("task panicked: {0}")]
    TaskPanicked(String),
}

/// Coarse classification of an [`Error`] for user-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The graph cannot be used yet (empty grid, root without a value).
    GraphNotReady,
    /// The request itself was rejected (bad value, bad shape, too large).
    InputRejected,
    /// The algorithm refuses to answer for this graph.
    Refused,
    /// Executor or internal failure.
    Internal,
}

impl Error {
    /// Returns the category used to pick a user-visible status.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyGraph | Self::NoValueAt(_) => ErrorCategory::GraphNotReady,
            Self::InvalidValue { .. }
            | Self::InputTooLarge { .. }
            | Self::OutOfBounds(_)
            | Self::InvalidShape { .. } => ErrorCategory::InputRejected,
            Self::NegativeCycle => ErrorCategory::Refused,
            Self::Executor(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

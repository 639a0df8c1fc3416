//! Common utilities used throughout Gridpath.
//!
//! - [`error`] - Error types like [`Error`] and [`ExecutorError`](error::ExecutorError)
//! - [`hash`] - Hash map and set aliases (single-threaded, concurrent, ordered)

pub mod error;
pub mod hash;

pub use error::{Error, Result};

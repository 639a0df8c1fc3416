//! # gridpath-common
//!
//! Foundation layer for Gridpath: types, errors, and collection aliases.
//!
//! This crate provides the fundamental building blocks used by all other
//! Gridpath crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (Vertex, Distance, Edge)
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{Distance, Edge, Vertex};
pub use utils::error::{Error, ErrorCategory, ExecutorError, Result};

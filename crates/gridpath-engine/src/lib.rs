//! # gridpath-engine
//!
//! The main entry point for Gridpath: configuration, the executor lifecycle,
//! and the graph queries callers run.
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`engine`] - GridPathEngine query surface and lifecycle

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;

pub use config::{Config, ConfigError};
pub use engine::GridPathEngine;

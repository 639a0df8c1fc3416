//! Core type definitions for Gridpath.
//!
//! - Grid coordinates ([`Vertex`]) and directed steps between them ([`Edge`])
//! - Accumulated path cost with an explicit "not reached" state ([`Distance`])

mod distance;
mod vertex;

pub use distance::Distance;
pub use vertex::{Edge, Vertex};

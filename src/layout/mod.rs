//! Constraint-based layout resolution
//!
//! This module turns a sparse set of positional constraints (edges, size,
//! center, absolute or percentage units) into a fully determined box inside a
//! frame.

pub mod error;
pub mod resolver;
pub mod types;
pub mod unit;

pub use error::ConstraintError;
pub use resolver::resolve;
pub use types::*;
pub use unit::parse_unit;

//! Parser for the textual constraint syntax
//!
//! ```text
//! top: 10, left: 50%, size: (20, 20)
//! center: { x: 50%, y: 50% }, width: 40, height: 40
//! ```

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;

use crate::layout::Constraints;

/// Parse constraint text straight into a [`Constraints`] set
pub fn parse_constraints(input: &str) -> Result<Constraints, Vec<crate::ParseError>> {
    parse(input).map(|list| list.to_constraints())
}

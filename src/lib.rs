//! Asset Variants - expand image asset declarations and lay out their contents
//!
//! This library expands a declaration of densities, sizes, formats, filenames
//! and directories into the full list of output files, and resolves sparse
//! positional constraints into concrete boxes for drawing onto each of them.
//!
//! # Example
//!
//! ```rust
//! use asset_variants::{define, Creator};
//!
//! let variants = define(Creator::sync(|results| {
//!     results
//!         .create()
//!         .densities([1.0, 2.0])
//!         .size(57.0, 57.0)
//!         .filename("icon")
//!         .directory("ios");
//! }))
//! .run()
//! .unwrap();
//!
//! assert_eq!(variants.len(), 2);
//! assert_eq!(variants[0].path, "ios/icon.png");
//! ```

pub mod error;
pub mod generator;
pub mod layout;
pub mod manifest;
pub mod parser;
pub mod renderer;

pub use error::{format_parse_errors, ParseError};
pub use generator::{
    define, Axis, ConfigurationError, Creator, Done, GenerateError, Generator, GeneratorConfig,
    Replacement, Results, Session, Value, Variant, VariantGenerator,
};
pub use layout::{resolve, Center, ConstraintError, Constraints, Frame, Measure, ResolvedBox};
pub use manifest::{Manifest, ManifestError};
pub use parser::parse_constraints;
pub use renderer::{build, Backend, BuildError, Canvas, DrawError, SvgBackend, SvgConfig};

use thiserror::Error;

/// Errors from any stage of the pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error while parsing constraint text
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error("layout error: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

impl From<Vec<ParseError>> for Error {
    fn from(errors: Vec<ParseError>) -> Self {
        Error::Parse(errors)
    }
}

/// Parse constraint text and resolve it inside `frame`
///
/// # Example
///
/// ```rust
/// use asset_variants::{place, Frame};
///
/// let resolved = place(Frame::new(200.0, 100.0), "bottom: 10, right: 10, size: (50, 20)").unwrap();
/// assert_eq!((resolved.x, resolved.y), (140.0, 70.0));
/// ```
pub fn place(frame: Frame, constraints: &str) -> Result<ResolvedBox, Error> {
    let constraints = parse_constraints(constraints)?;
    Ok(resolve(frame, &constraints)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_reports_parse_errors() {
        let err = place(Frame::new(10.0, 10.0), "top: ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_place_reports_constraint_errors() {
        let err = place(Frame::new(10.0, 10.0), "top: 1, bottom: 1, height: 1").unwrap_err();
        assert!(err.to_string().starts_with("layout error: cannot have all three"));
    }
}

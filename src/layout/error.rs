//! Error types for the layout resolver

use thiserror::Error;

use super::types::Dimension;

/// Errors raised while resolving a constraint set into a box
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstraintError {
    /// Both edges and the extent were given on one axis
    #[error("cannot have all three of {}, {} and {}", .axis.start_edge(), .axis.end_edge(), .axis.extent())]
    OverConstrained { axis: Dimension },

    /// A constraint needs the extent on its axis to be known first
    #[error("`{constraint}` requires a known {}", .axis.extent())]
    MissingExtent {
        constraint: &'static str,
        axis: Dimension,
    },

    /// Nothing pins down the position or extent on this axis
    #[error("cannot resolve {axis} position")]
    Unresolved { axis: Dimension },

    /// A unit string that is neither a number nor a percentage
    #[error("invalid unit value '{raw}'")]
    InvalidUnit { raw: String },
}

impl ConstraintError {
    /// Create an over-constrained error
    pub fn over_constrained(axis: Dimension) -> Self {
        Self::OverConstrained { axis }
    }

    /// Create a missing extent error
    pub fn missing_extent(constraint: &'static str, axis: Dimension) -> Self {
        Self::MissingExtent { constraint, axis }
    }

    /// Create an unresolved axis error
    pub fn unresolved(axis: Dimension) -> Self {
        Self::Unresolved { axis }
    }

    /// Create an invalid unit error
    pub fn invalid_unit(raw: impl Into<String>) -> Self {
        Self::InvalidUnit { raw: raw.into() }
    }

    /// The axis the error was detected on, if any
    pub fn axis(&self) -> Option<Dimension> {
        match self {
            Self::OverConstrained { axis }
            | Self::MissingExtent { axis, .. }
            | Self::Unresolved { axis } => Some(*axis),
            Self::InvalidUnit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_constrained_display() {
        let err = ConstraintError::over_constrained(Dimension::Vertical);
        assert_eq!(err.to_string(), "cannot have all three of top, bottom and height");
    }

    #[test]
    fn test_unresolved_display() {
        let err = ConstraintError::unresolved(Dimension::Vertical);
        assert_eq!(err.to_string(), "cannot resolve vertical position");
    }

    #[test]
    fn test_missing_extent_display() {
        let err = ConstraintError::missing_extent("right", Dimension::Horizontal);
        assert!(err.to_string().contains("requires a known width"));
        assert_eq!(err.axis(), Some(Dimension::Horizontal));
    }
}

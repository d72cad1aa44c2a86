//! Error types for variant generation

use std::time::Duration;

use thiserror::Error;

use super::axis::Axis;

/// A generator was configured in a way that cannot produce variants
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    /// A required axis has no values
    #[error("no {} declared", .axis.plural())]
    MissingAxis { axis: Axis },

    /// A typed variant field was assigned a value of another type
    #[error("field '{field}' expects {expected}, got {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ConfigurationError {
    /// Create a missing axis error
    pub fn missing_axis(axis: Axis) -> Self {
        Self::MissingAxis { axis }
    }

    /// Create a field type error
    pub fn field_type(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::FieldType {
            field: field.into(),
            expected,
            found,
        }
    }
}

/// Errors that end a generation session
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The creator did not signal completion before the deadline
    #[error("variant generation took longer than {timeout:?}")]
    Timeout { timeout: Duration },
}

impl GenerateError {
    /// Whether this is a deadline failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

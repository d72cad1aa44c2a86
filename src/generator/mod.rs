//! Variant generation
//!
//! A [`VariantGenerator`] holds value lists for each [`Axis`] and expands
//! their cross product into [`Variant`] records. A [`Session`] runs a
//! user-supplied [`Creator`] that declares generators through [`Results`],
//! branches them, and signals completion.

mod augment;
pub mod axis;
pub mod config;
pub mod error;
pub mod session;
pub mod value;
pub mod variant;
pub mod variant_generator;

pub use augment::{build_path, join_path};
pub use axis::Axis;
pub use config::{GeneratorConfig, DEFAULT_TIMEOUT};
pub use error::{ConfigurationError, GenerateError};
pub use session::{define, Creator, Done, Generator, Results, Session};
pub use value::Value;
pub use variant::{RawVariant, Variant};
pub use variant_generator::{Replacement, VariantGenerator};

//! Drawing surfaces and output backends
//!
//! A [`Canvas`] records drawing commands for one variant; a [`Backend`]
//! turns a finished canvas into output. [`build`] drives both over a list of
//! variants.

pub mod build;
pub mod canvas;
pub mod config;
pub mod svg;

pub use build::{build, BuildError, Rendered};
pub use canvas::{Canvas, DrawCommand, PixelRect};
pub use config::SvgConfig;
pub use svg::{SvgBackend, SvgBuilder};

use thiserror::Error;

use crate::layout::ConstraintError;

/// Errors a drawing callback or backend may return
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DrawError {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error("{0}")]
    Backend(String),
}

impl DrawError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Turns a recorded canvas into output
pub trait Backend {
    type Output;

    fn render(&mut self, canvas: &Canvas<'_>) -> Result<Self::Output, DrawError>;
}

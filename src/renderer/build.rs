//! Sequential rendering of a variant list

use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::canvas::Canvas;
use super::{Backend, DrawError};
use crate::generator::Variant;

/// Rendering stopped at a variant
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: DrawError,
    },
}

impl BuildError {
    /// Path of the variant that failed
    pub fn path(&self) -> &str {
        match self {
            BuildError::Render { path, .. } => path,
        }
    }
}

/// Backend output for one variant
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered<T> {
    pub path: String,
    pub output: T,
}

/// Draw and render every variant in order
///
/// `draw` is called once per variant with a fresh canvas. The first error,
/// from either `draw` or the backend, stops the run; later variants are not
/// attempted.
#[tracing::instrument(level = "debug", skip_all, fields(count = variants.len()))]
pub fn build<B, F>(
    variants: &[Variant],
    basepath: impl AsRef<Path>,
    backend: &mut B,
    mut draw: F,
) -> Result<Vec<Rendered<B::Output>>, BuildError>
where
    B: Backend,
    F: FnMut(&mut Canvas<'_>) -> Result<(), DrawError>,
{
    let basepath = basepath.as_ref();
    let mut rendered = Vec::with_capacity(variants.len());

    for variant in variants {
        info!(path = %variant.path, "generate file");

        let mut canvas = Canvas::new(variant, basepath);
        let output = draw(&mut canvas)
            .and_then(|()| backend.render(&canvas))
            .map_err(|source| BuildError::Render {
                path: variant.path.clone(),
                source,
            })?;

        rendered.push(Rendered {
            path: variant.path.clone(),
            output,
        });
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{RawVariant, Variant};
    use crate::layout::Constraints;
    use crate::renderer::DrawCommand;

    /// Counts commands instead of rendering them
    struct CountingBackend;

    impl Backend for CountingBackend {
        type Output = usize;

        fn render(&mut self, canvas: &Canvas<'_>) -> Result<usize, DrawError> {
            Ok(canvas.commands().len())
        }
    }

    fn variant(width: f64, filename: &str) -> Variant {
        let mut v = Variant::from_raw(RawVariant {
            density: 1.0,
            size: (width, 10.0),
            caps: (0.0, 0.0),
            format: "png".to_string(),
            filename: filename.to_string(),
            directory: "out".to_string(),
        });
        v.path = format!("out/{}.png", filename);
        v
    }

    #[test]
    fn test_builds_every_variant() {
        let variants = vec![variant(10.0, "a"), variant(20.0, "b")];
        let rendered = build(&variants, "assets", &mut CountingBackend, |canvas| {
            canvas.fill("#000");
            canvas.rect("#fff", &Constraints::new().top(0).left(0).size(5, 5))?;
            Ok(())
        })
        .unwrap();

        assert_eq!(
            rendered,
            vec![
                Rendered {
                    path: "out/a.png".to_string(),
                    output: 2
                },
                Rendered {
                    path: "out/b.png".to_string(),
                    output: 2
                },
            ]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let variants = vec![variant(10.0, "a"), variant(20.0, "b"), variant(30.0, "c")];
        let mut seen = vec![];
        let err = build(&variants, ".", &mut CountingBackend, |canvas| {
            seen.push(canvas.variant().path.clone());
            if canvas.variant().width > 15.0 {
                return Err(DrawError::backend("too wide"));
            }
            Ok(())
        })
        .unwrap_err();

        assert_eq!(err.path(), "out/b.png");
        assert_eq!(seen, vec!["out/a.png", "out/b.png"]);
        assert_eq!(err.to_string(), "failed to render out/b.png: too wide");
    }

    #[test]
    fn test_canvas_receives_basepath() {
        let variants = vec![variant(10.0, "a")];
        build(&variants, "assets", &mut CountingBackend, |canvas| {
            canvas.fill_repeat("tile.png");
            assert_eq!(
                canvas.commands(),
                &[DrawCommand::FillRepeat {
                    source: "assets/tile.png".into()
                }]
            );
            Ok(())
        })
        .unwrap();
    }
}

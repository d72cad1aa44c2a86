//! Per-variant drawing surface

use std::path::{Path, PathBuf};

use crate::generator::Variant;
use crate::layout::{resolve, ConstraintError, Constraints, Frame, ResolvedBox};

/// A rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A recorded drawing operation, in device pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas with a color
    Fill { color: String },
    /// Tile an image over the whole canvas
    FillRepeat { source: PathBuf },
    /// Draw an image stretched into `rect`
    Image { source: PathBuf, rect: PixelRect },
    /// Fill `rect` with a color
    Rect { color: String, rect: PixelRect },
}

/// Drawing surface for one variant
///
/// Layout happens in logical units against the variant's effective size;
/// recorded commands are scaled by the variant density and rounded.
#[derive(Debug)]
pub struct Canvas<'v> {
    variant: &'v Variant,
    basepath: PathBuf,
    commands: Vec<DrawCommand>,
}

impl<'v> Canvas<'v> {
    pub fn new(variant: &'v Variant, basepath: impl Into<PathBuf>) -> Self {
        Self {
            variant,
            basepath: basepath.into(),
            commands: vec![],
        }
    }

    pub fn variant(&self) -> &'v Variant {
        self.variant
    }

    pub fn basepath(&self) -> &Path {
        &self.basepath
    }

    /// Logical frame that constraints are resolved against
    pub fn frame(&self) -> Frame {
        Frame::new(self.variant.width, self.variant.height)
    }

    /// Scale a logical length to device pixels, rounding half up
    pub fn real(&self, n: f64) -> f64 {
        (n * self.variant.density + 0.5).floor()
    }

    pub fn real_width(&self) -> f64 {
        self.real(self.variant.width)
    }

    pub fn real_height(&self) -> f64 {
        self.real(self.variant.height)
    }

    pub fn fill(&mut self, color: impl Into<String>) -> &mut Self {
        self.commands.push(DrawCommand::Fill {
            color: color.into(),
        });
        self
    }

    /// Tile `src` (relative to the base path) over the canvas
    pub fn fill_repeat(&mut self, src: impl AsRef<Path>) -> &mut Self {
        let source = self.basepath.join(src);
        self.commands.push(DrawCommand::FillRepeat { source });
        self
    }

    /// Draw `src` (relative to the base path) into the box `constraints` describe
    pub fn place(
        &mut self,
        src: impl AsRef<Path>,
        constraints: &Constraints,
    ) -> Result<ResolvedBox, ConstraintError> {
        let resolved = resolve(self.frame(), constraints)?;
        let source = self.basepath.join(src);
        let rect = self.device_rect(&resolved);
        self.commands.push(DrawCommand::Image { source, rect });
        Ok(resolved)
    }

    /// Fill the box `constraints` describe
    pub fn rect(
        &mut self,
        color: impl Into<String>,
        constraints: &Constraints,
    ) -> Result<ResolvedBox, ConstraintError> {
        let resolved = resolve(self.frame(), constraints)?;
        let rect = self.device_rect(&resolved);
        self.commands.push(DrawCommand::Rect {
            color: color.into(),
            rect,
        });
        Ok(resolved)
    }

    fn device_rect(&self, resolved: &ResolvedBox) -> PixelRect {
        PixelRect {
            x: self.real(resolved.x),
            y: self.real(resolved.y),
            width: self.real(resolved.width),
            height: self.real(resolved.height),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RawVariant;
    use crate::layout::{Center, Measure};

    fn variant(density: f64, size: (f64, f64)) -> Variant {
        Variant::from_raw(RawVariant {
            density,
            size,
            caps: (0.0, 20.0),
            format: "png".to_string(),
            filename: "splash".to_string(),
            directory: "out".to_string(),
        })
    }

    #[test]
    fn test_real_rounds_half_up() {
        let v = variant(1.5, (57.0, 77.0));
        let canvas = Canvas::new(&v, "assets");
        assert_eq!(canvas.real(57.0), 86.0);
        assert_eq!(canvas.real(1.0), 2.0);
        assert_eq!(canvas.real_height(), 86.0);
    }

    #[test]
    fn test_frame_uses_effective_size() {
        let v = variant(1.0, (320.0, 480.0));
        let canvas = Canvas::new(&v, "assets");
        assert_eq!(canvas.frame(), Frame::new(320.0, 460.0));
    }

    #[test]
    fn test_place_records_device_pixels() {
        let v = variant(2.0, (320.0, 480.0));
        let mut canvas = Canvas::new(&v, "assets");
        let resolved = canvas
            .place(
                "logo.png",
                &Constraints::new()
                    .size(Measure::percent(50.0), Measure::percent(50.0))
                    .center(Center::new(Measure::percent(50.0), Measure::percent(50.0))),
            )
            .unwrap();
        assert_eq!(resolved.width, 160.0);
        assert_eq!(
            canvas.commands(),
            &[DrawCommand::Image {
                source: PathBuf::from("assets/logo.png"),
                rect: PixelRect {
                    x: 160.0,
                    y: 230.0,
                    width: 320.0,
                    height: 460.0,
                },
            }]
        );
    }

    #[test]
    fn test_rect_propagates_constraint_errors() {
        let v = variant(1.0, (100.0, 100.0));
        let mut canvas = Canvas::new(&v, ".");
        let err = canvas
            .rect("#000", &Constraints::new().bottom(10.0))
            .unwrap_err();
        assert!(matches!(err, ConstraintError::MissingExtent { .. }));
        assert!(canvas.commands().is_empty());
    }
}

//! SVG preview backend

use std::path::Path;

use super::canvas::{Canvas, DrawCommand, PixelRect};
use super::{Backend, DrawError, SvgConfig};

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
    patterns: usize,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            patterns: 0,
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a filled rectangle
    pub fn add_rect(&mut self, class: &str, rect: PixelRect, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}{}" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            class,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            escape_xml(fill)
        ));
    }

    /// Add an image stretched into `rect`
    pub fn add_image(&mut self, source: &Path, rect: PixelRect) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<image class="{}image" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
            self.indent_str(),
            prefix,
            escape_xml(&source.display().to_string()),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        ));
    }

    /// Define a tiling pattern for `source` and return its id
    pub fn add_pattern(&mut self, source: &Path) -> String {
        let id = format!("{}pattern-{}", self.prefix(), self.patterns);
        let tile = self.config.repeat_tile;
        self.patterns += 1;
        self.defs.push(format!(
            r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{tile}" height="{tile}"><image href="{}" width="{tile}" height="{tile}"/></pattern>"#,
            escape_xml(&source.display().to_string())
        ));
        id
    }

    /// Build the final SVG string for a `width` x `height` device-pixel canvas
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            let inner = if self.config.pretty_print { "    " } else { "" };
            svg.push_str(&self.indent_str());
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str(inner);
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str(&self.indent_str());
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Renders a canvas as an SVG document referencing its source images
#[derive(Debug, Clone, Default)]
pub struct SvgBackend {
    config: SvgConfig,
}

impl SvgBackend {
    pub fn new(config: SvgConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SvgConfig {
        &self.config
    }
}

impl Backend for SvgBackend {
    type Output = String;

    fn render(&mut self, canvas: &Canvas<'_>) -> Result<String, DrawError> {
        let width = canvas.real_width();
        let height = canvas.real_height();
        let full = PixelRect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        };

        let mut builder = SvgBuilder::new(self.config.clone());
        for command in canvas.commands() {
            match command {
                DrawCommand::Fill { color } => builder.add_rect("fill", full, color),
                DrawCommand::FillRepeat { source } => {
                    let id = builder.add_pattern(source);
                    builder.add_rect("fill", full, &format!("url(#{})", id));
                }
                DrawCommand::Image { source, rect } => builder.add_image(source, *rect),
                DrawCommand::Rect { color, rect } => builder.add_rect("rect", *rect, color),
            }
        }
        Ok(builder.build(width, height))
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{RawVariant, Variant};
    use crate::layout::Constraints;

    fn variant() -> Variant {
        Variant::from_raw(RawVariant {
            density: 2.0,
            size: (50.0, 40.0),
            caps: (0.0, 0.0),
            format: "png".to_string(),
            filename: "icon".to_string(),
            directory: "out".to_string(),
        })
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_uses_device_size() {
        let v = variant();
        let mut canvas = Canvas::new(&v, "assets");
        canvas.fill("#fff");
        let svg = SvgBackend::default().render(&canvas).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 80""#));
        assert!(svg.contains(
            r##"<rect class="av-fill" x="0" y="0" width="100" height="80" fill="#fff"/>"##
        ));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_image_and_rect() {
        let v = variant();
        let mut canvas = Canvas::new(&v, "assets");
        canvas
            .place("logo.png", &Constraints::new().top(5).left(5).size(10, 10))
            .unwrap();
        canvas
            .rect("red", &Constraints::new().bottom(0).left(0).right(0).height(4))
            .unwrap();

        let config = SvgConfig::new().with_pretty_print(false).with_standalone(false);
        let svg = SvgBackend::new(config).render(&canvas).unwrap();

        insta::assert_snapshot!(svg, @r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80" viewBox="0 0 100 80"><image class="av-image" href="assets/logo.png" x="10" y="10" width="20" height="20" preserveAspectRatio="none"/><rect class="av-rect" x="0" y="72" width="100" height="8" fill="red"/></svg>"#);
    }

    #[test]
    fn test_repeat_fill_defines_pattern() {
        let v = variant();
        let mut canvas = Canvas::new(&v, "assets");
        canvas.fill_repeat("tile.png");
        let svg = SvgBackend::default().render(&canvas).unwrap();

        assert!(svg.contains(r#"<pattern id="av-pattern-0""#));
        assert!(svg.contains(r#"fill="url(#av-pattern-0)""#));
        assert!(svg.contains(r#"href="assets/tile.png""#));
    }
}

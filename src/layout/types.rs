//! Core types for the layout resolver

use serde::Serialize;

/// Which axis of the frame a constraint applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Top, bottom, height, center y
    Vertical,
    /// Left, right, width, center x
    Horizontal,
}

impl Dimension {
    /// Name of the leading edge (`top` or `left`)
    pub fn start_edge(self) -> &'static str {
        match self {
            Dimension::Vertical => "top",
            Dimension::Horizontal => "left",
        }
    }

    /// Name of the trailing edge (`bottom` or `right`)
    pub fn end_edge(self) -> &'static str {
        match self {
            Dimension::Vertical => "bottom",
            Dimension::Horizontal => "right",
        }
    }

    /// Name of the extent along this axis (`height` or `width`)
    pub fn extent(self) -> &'static str {
        match self {
            Dimension::Vertical => "height",
            Dimension::Horizontal => "width",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Vertical => write!(f, "vertical"),
            Dimension::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// The enclosing area constraints are resolved against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length of the frame along `dimension`
    pub fn extent(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Vertical => self.height,
            Dimension::Horizontal => self.width,
        }
    }
}

/// A positional or size value: absolute, or a percentage of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Px(f64),
    Percent(f64),
}

impl Measure {
    pub fn px(value: f64) -> Self {
        Measure::Px(value)
    }

    pub fn percent(value: f64) -> Self {
        Measure::Percent(value)
    }

    /// Convert to an absolute measurement against `base`
    ///
    /// No rounding happens here; snapping to device pixels is the canvas' job.
    pub fn resolve(self, base: f64) -> f64 {
        match self {
            Measure::Px(v) => v,
            Measure::Percent(p) => p * base / 100.0,
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::Px(value)
    }
}

impl From<i32> for Measure {
    fn from(value: i32) -> Self {
        Measure::Px(f64::from(value))
    }
}

impl From<u32> for Measure {
    fn from(value: u32) -> Self {
        Measure::Px(f64::from(value))
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Measure::Px(v) => write!(f, "{}", v),
            Measure::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Center point of the placed box, each coordinate against its own frame axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub x: Measure,
    pub y: Measure,
}

impl Center {
    pub fn new(x: impl Into<Measure>, y: impl Into<Measure>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl<X: Into<Measure>, Y: Into<Measure>> From<(X, Y)> for Center {
    fn from((x, y): (X, Y)) -> Self {
        Center::new(x, y)
    }
}

/// A sparse set of positional constraints
///
/// Any combination of fields may be set; [`crate::layout::resolve`] decides
/// whether the set pins down a single box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub size: Option<(Measure, Measure)>,
    pub width: Option<Measure>,
    pub height: Option<Measure>,
    pub top: Option<Measure>,
    pub right: Option<Measure>,
    pub bottom: Option<Measure>,
    pub left: Option<Measure>,
    pub center: Option<Center>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: impl Into<Measure>, height: impl Into<Measure>) -> Self {
        self.size = Some((width.into(), height.into()));
        self
    }

    pub fn width(mut self, value: impl Into<Measure>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn height(mut self, value: impl Into<Measure>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn top(mut self, value: impl Into<Measure>) -> Self {
        self.top = Some(value.into());
        self
    }

    pub fn right(mut self, value: impl Into<Measure>) -> Self {
        self.right = Some(value.into());
        self
    }

    pub fn bottom(mut self, value: impl Into<Measure>) -> Self {
        self.bottom = Some(value.into());
        self
    }

    pub fn left(mut self, value: impl Into<Measure>) -> Self {
        self.left = Some(value.into());
        self
    }

    pub fn center(mut self, center: impl Into<Center>) -> Self {
        self.center = Some(center.into());
        self
    }

    /// Width, falling back to the first component of `size`
    pub fn effective_width(&self) -> Option<Measure> {
        self.width.or(self.size.map(|(w, _)| w))
    }

    /// Height, falling back to the second component of `size`
    pub fn effective_height(&self) -> Option<Measure> {
        self.height.or(self.size.map(|(_, h)| h))
    }
}

/// A fully determined box inside a frame
///
/// Invariant: `x + width + right == frame.width` and
/// `y + height + bottom == frame.height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ResolvedBox {
    /// Build a box from its origin and extent, deriving the mirrored edges
    pub fn within(frame: Frame, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            top: y,
            left: x,
            right: frame.width - x - width,
            bottom: frame.height - y - height,
        }
    }

    /// Center point of the box
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

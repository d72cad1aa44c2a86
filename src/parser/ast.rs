//! Syntax tree for constraint text

use crate::layout::{Center, Constraints, Measure};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Single-value constraint keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKey {
    Top,
    Right,
    Bottom,
    Left,
    Width,
    Height,
}

/// One `key: value` entry
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// `top: 10`, `width: 50%`, ...
    Edge(EdgeKey, Measure),
    /// `size: (w, h)`
    Size(Measure, Measure),
    /// `center: (x, y)` or `center: { x: .., y: .. }`
    Center(Measure, Measure),
}

/// A parsed constraint list, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintList {
    pub entries: Vec<Spanned<Entry>>,
}

impl ConstraintList {
    /// Fold the entries into a constraint set; later entries override earlier ones
    pub fn to_constraints(&self) -> Constraints {
        self.entries
            .iter()
            .fold(Constraints::new(), |c, entry| match entry.node {
                Entry::Edge(EdgeKey::Top, m) => c.top(m),
                Entry::Edge(EdgeKey::Right, m) => c.right(m),
                Entry::Edge(EdgeKey::Bottom, m) => c.bottom(m),
                Entry::Edge(EdgeKey::Left, m) => c.left(m),
                Entry::Edge(EdgeKey::Width, m) => c.width(m),
                Entry::Edge(EdgeKey::Height, m) => c.height(m),
                Entry::Size(w, h) => c.size(w, h),
                Entry::Center(x, y) => c.center(Center::new(x, y)),
            })
    }
}

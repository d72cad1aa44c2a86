//! Axes of the variant cross product

/// One configurable dimension of the expansion
///
/// Besides naming the literal value lists, each axis also names the variant
/// field that [`crate::VariantGenerator::compute`] overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Density,
    Size,
    Cap,
    Format,
    Filename,
    Directory,
}

impl Axis {
    /// All axes, outermost first
    pub const ALL: [Axis; 6] = [
        Axis::Density,
        Axis::Size,
        Axis::Cap,
        Axis::Format,
        Axis::Filename,
        Axis::Directory,
    ];

    /// The variant field a computed value for this axis is written to
    pub fn field(self) -> &'static str {
        match self {
            Axis::Density => "density",
            Axis::Size => "size",
            Axis::Cap => "caps",
            Axis::Format => "format",
            Axis::Filename => "filename",
            Axis::Directory => "directory",
        }
    }

    /// Plural name, as used for the value lists
    pub fn plural(self) -> &'static str {
        match self {
            Axis::Density => "densities",
            Axis::Size => "sizes",
            Axis::Cap => "caps",
            Axis::Format => "formats",
            Axis::Filename => "filenames",
            Axis::Directory => "directories",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

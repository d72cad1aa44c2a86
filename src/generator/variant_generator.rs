//! Axis definitions and cross-product expansion

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::augment::augment;
use super::axis::Axis;
use super::config::GeneratorConfig;
use super::error::ConfigurationError;
use super::value::Value;
use super::variant::{RawVariant, Variant};

/// A function computing a field from the variant built so far
///
/// `None` leaves the field untouched.
pub(crate) type FieldFn = Arc<dyn Fn(&Variant, &VariantGenerator) -> Option<Value> + Send + Sync>;

/// A static or computed data entry
#[derive(Clone)]
pub(crate) enum DataValue {
    Static(Value),
    Computed(FieldFn),
}

/// Replacement text for [`VariantGenerator::replace`]
#[derive(Clone)]
pub enum Replacement {
    Literal(String),
    Computed(Arc<dyn Fn(&Variant) -> String + Send + Sync>),
}

impl Replacement {
    /// Replacement derived from the variant being augmented
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Variant) -> String + Send + Sync + 'static,
    {
        Replacement::Computed(Arc::new(f))
    }

    fn text(&self, variant: &Variant) -> String {
        match self {
            Replacement::Literal(s) => s.clone(),
            Replacement::Computed(f) => f(variant),
        }
    }
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::Literal(value.to_string())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Literal(value)
    }
}

/// Holds the axes of one variant family and expands them
///
/// Setters append literal values and return `&mut Self` for chaining.
/// `Clone` yields an independent copy: mutating the copy's axes never affects
/// the source.
#[derive(Clone)]
pub struct VariantGenerator {
    config: GeneratorConfig,
    active: bool,
    densities: Vec<f64>,
    sizes: Vec<(f64, f64)>,
    caps: Vec<(f64, f64)>,
    formats: Vec<String>,
    filenames: Vec<String>,
    directories: Vec<String>,
    rotate: bool,
    data: Vec<(String, DataValue)>,
    procedures: Vec<(String, Vec<FieldFn>)>,
}

impl Default for VariantGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl std::fmt::Debug for VariantGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantGenerator")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("densities", &self.densities)
            .field("sizes", &self.sizes)
            .field("caps", &self.caps)
            .field("formats", &self.formats)
            .field("filenames", &self.filenames)
            .field("directories", &self.directories)
            .field("rotate", &self.rotate)
            .field(
                "data",
                &self.data.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .field(
                "procedures",
                &self
                    .procedures
                    .iter()
                    .map(|(k, _)| k.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl VariantGenerator {
    /// Create an active generator with no axis values
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            active: true,
            densities: vec![],
            sizes: vec![],
            caps: vec![],
            formats: vec![],
            filenames: vec![],
            directories: vec![],
            rotate: false,
            data: vec![],
            procedures: vec![],
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) -> &mut Self {
        self.active = true;
        self
    }

    /// Suppress this generator's output; it stays usable for branching
    pub fn deactivate(&mut self) -> &mut Self {
        self.active = false;
        self
    }

    pub fn density(&mut self, density: f64) -> &mut Self {
        self.densities.push(density);
        self
    }

    pub fn densities(&mut self, densities: impl IntoIterator<Item = f64>) -> &mut Self {
        self.densities.extend(densities);
        self
    }

    pub fn size(&mut self, width: f64, height: f64) -> &mut Self {
        self.sizes.push((width, height));
        self
    }

    pub fn sizes(&mut self, sizes: impl IntoIterator<Item = (f64, f64)>) -> &mut Self {
        self.sizes.extend(sizes);
        self
    }

    /// Crop `width` and `height` off every declared size
    pub fn cap(&mut self, width: f64, height: f64) -> &mut Self {
        self.caps.push((width, height));
        self
    }

    pub fn caps(&mut self, caps: impl IntoIterator<Item = (f64, f64)>) -> &mut Self {
        self.caps.extend(caps);
        self
    }

    pub fn format(&mut self, format: impl Into<String>) -> &mut Self {
        self.formats.push(format.into());
        self
    }

    pub fn formats<S: Into<String>>(&mut self, formats: impl IntoIterator<Item = S>) -> &mut Self {
        self.formats.extend(formats.into_iter().map(Into::into));
        self
    }

    pub fn filename(&mut self, filename: impl Into<String>) -> &mut Self {
        self.filenames.push(filename.into());
        self
    }

    pub fn filenames<S: Into<String>>(&mut self, filenames: impl IntoIterator<Item = S>) -> &mut Self {
        self.filenames.extend(filenames.into_iter().map(Into::into));
        self
    }

    pub fn directory(&mut self, directory: impl Into<String>) -> &mut Self {
        self.directories.push(directory.into());
        self
    }

    pub fn directories<S: Into<String>>(
        &mut self,
        directories: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.directories.extend(directories.into_iter().map(Into::into));
        self
    }

    /// Also produce the transposed variant of every declared size
    pub fn rotate(&mut self, rotate: bool) -> &mut Self {
        self.rotate = rotate;
        self
    }

    /// Merge a static field into every produced variant
    pub fn data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert_data(key.into(), DataValue::Static(value.into()));
        self
    }

    /// Merge a computed field into every produced variant
    pub fn data_fn<F, R>(&mut self, key: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let f: FieldFn = Arc::new(move |v: &Variant, g: &VariantGenerator| Some(f(v, g).into()));
        self.insert_data(key.into(), DataValue::Computed(f));
        self
    }

    fn insert_data(&mut self, key: String, value: DataValue) {
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.data.push((key, value)),
        }
    }

    /// Append a function to the named procedure
    ///
    /// All functions registered under a name run in registration order during
    /// augmentation, each writing its result to the field before the next runs.
    pub fn procedure<F, R>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let f: FieldFn = Arc::new(move |v: &Variant, g: &VariantGenerator| Some(f(v, g).into()));
        self.push_procedure(name.into(), f);
        self
    }

    /// Register a computed value for an axis field instead of literal values
    pub fn compute<F, R>(&mut self, axis: Axis, f: F) -> &mut Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.procedure(axis.field(), f)
    }

    /// Substitute the first occurrence of `from` in the text field `property`
    /// during augmentation
    ///
    /// Runs as a procedure on the value left by earlier procedures. Fields
    /// that are not text are left untouched.
    pub fn replace(
        &mut self,
        property: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<Replacement>,
    ) -> &mut Self {
        let property = property.into();
        let from = from.into();
        let to = to.into();
        let field = property.clone();
        let f: FieldFn = Arc::new(move |v: &Variant, _: &VariantGenerator| match v.get(&field) {
            Some(Value::Text(current)) => {
                Some(Value::Text(current.replacen(&from, &to.text(v), 1)))
            }
            _ => None,
        });
        self.push_procedure(property, f);
        self
    }

    fn push_procedure(&mut self, name: String, f: FieldFn) {
        match self.procedures.iter_mut().find(|(k, _)| *k == name) {
            Some((_, list)) => list.push(f),
            None => self.procedures.push((name, vec![f])),
        }
    }

    pub(crate) fn data_entries(&self) -> &[(String, DataValue)] {
        &self.data
    }

    pub(crate) fn procedure_entries(&self) -> &[(String, Vec<FieldFn>)] {
        &self.procedures
    }

    /// Sizes in iteration order: transposed sizes first when rotating
    pub fn effective_sizes(&self) -> Vec<(f64, f64)> {
        if self.rotate {
            self.sizes
                .iter()
                .map(|&(w, h)| (h, w))
                .chain(self.sizes.iter().copied())
                .collect()
        } else {
            self.sizes.clone()
        }
    }

    /// The raw cross product of all axes
    ///
    /// Nesting order, outermost first: density, size, caps, format, filename,
    /// directory. Each axis is de-duplicated by its canonical string form.
    pub fn raw(&self) -> Result<Vec<RawVariant>, ConfigurationError> {
        if !self.active {
            return Ok(vec![]);
        }

        let sizes = unique(&self.effective_sizes(), |&(w, h)| Value::Pair(w, h).to_string());
        if sizes.is_empty() {
            return Err(ConfigurationError::missing_axis(Axis::Size));
        }
        let filenames = unique(&self.filenames, Clone::clone);
        if filenames.is_empty() {
            return Err(ConfigurationError::missing_axis(Axis::Filename));
        }
        let directories = unique(&self.directories, Clone::clone);
        if directories.is_empty() {
            return Err(ConfigurationError::missing_axis(Axis::Directory));
        }
        let densities = or_default(unique(&self.densities, |d| Value::Number(*d).to_string()), 1.0);
        let caps = or_default(
            unique(&self.caps, |&(w, h)| Value::Pair(w, h).to_string()),
            (0.0, 0.0),
        );
        let formats = or_default(unique(&self.formats, Clone::clone), "png".to_string());

        let mut raw = Vec::with_capacity(
            densities.len()
                * sizes.len()
                * caps.len()
                * formats.len()
                * filenames.len()
                * directories.len(),
        );
        for &density in &densities {
            for &size in &sizes {
                for &caps in &caps {
                    for format in &formats {
                        for filename in &filenames {
                            for directory in &directories {
                                raw.push(RawVariant {
                                    density,
                                    size,
                                    caps,
                                    format: format.clone(),
                                    filename: filename.clone(),
                                    directory: directory.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(raw)
    }

    /// Expand and augment every variant of this generator
    ///
    /// Inactive generators produce nothing.
    #[tracing::instrument(level = "debug", skip(self), fields(active = self.active))]
    pub fn generate(&self) -> Result<Vec<Variant>, ConfigurationError> {
        let variants = self
            .raw()?
            .into_iter()
            .map(|raw| augment(self, raw))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = variants.len(), "generated variants");
        Ok(variants)
    }
}

/// Keep the first value of every canonical key, in order
fn unique<T: Clone>(values: &[T], key: impl Fn(&T) -> String) -> Vec<T> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(key(v)))
        .cloned()
        .collect()
}

fn or_default<T>(values: Vec<T>, default: T) -> Vec<T> {
    if values.is_empty() {
        vec![default]
    } else {
        values
    }
}

//! TOML manifests describing generators and drawing layers
//!
//! ```toml
//! [config]
//! add_extension = true
//! timeout_ms = 1000
//!
//! [[generator]]
//! densities = [1, 2]
//! sizes = [[57, 57]]
//! filenames = ["icon"]
//! directories = ["ios"]
//! [generator.data]
//! platform = "ios"
//!
//! [[layer]]
//! fill = "#ffffff"
//! [[layer]]
//! place = "logo.png"
//! at = "center: (50%, 50%), size: (60%, 60%)"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::generator::{Creator, GenerateError, Generator, GeneratorConfig, Session, Value, Variant};
use crate::layout::Constraints;
use crate::parser::parse_constraints;
use crate::renderer::{Canvas, DrawError};

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("layer {index}: {reason}")]
    InvalidLayer { index: usize, reason: String },

    #[error("generator {generator}: matrix row {row} must be [density, width, height]")]
    InvalidMatrixRow { generator: usize, row: usize },

    #[error("generator {generator}: data field '{key}' has an unsupported type")]
    InvalidData { generator: usize, key: String },

    #[error("layer {index}: invalid constraints\n{message}")]
    Constraint { index: usize, message: String },
}

/// One generator's axes, as declared in a manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorSpec {
    pub densities: Vec<f64>,
    pub sizes: Vec<(f64, f64)>,
    pub caps: Vec<(f64, f64)>,
    pub formats: Vec<String>,
    pub filenames: Vec<String>,
    pub directories: Vec<String>,
    pub rotate: bool,
    pub matrix: Vec<[f64; 3]>,
    pub data: Vec<(String, Value)>,
}

impl GeneratorSpec {
    /// Apply these axes to a registered generator, branching for matrix rows
    pub fn apply(&self, generator: &Generator) {
        generator
            .densities(self.densities.iter().copied())
            .sizes(self.sizes.iter().copied())
            .caps(self.caps.iter().copied())
            .formats(self.formats.iter().cloned())
            .filenames(self.filenames.iter().cloned())
            .directories(self.directories.iter().cloned())
            .rotate(self.rotate);
        for (key, value) in &self.data {
            generator.data(key.clone(), value.clone());
        }
        if !self.matrix.is_empty() {
            generator.matrix(self.matrix.iter().copied());
        }
    }
}

/// A drawing step applied to every variant
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Fill { color: String },
    Repeat { source: String },
    Place { source: String, constraints: Constraints },
    Rect { color: String, constraints: Constraints },
}

impl Layer {
    pub fn draw(&self, canvas: &mut Canvas<'_>) -> Result<(), DrawError> {
        match self {
            Layer::Fill { color } => {
                canvas.fill(color.as_str());
            }
            Layer::Repeat { source } => {
                canvas.fill_repeat(source);
            }
            Layer::Place {
                source,
                constraints,
            } => {
                canvas.place(source, constraints)?;
            }
            Layer::Rect { color, constraints } => {
                canvas.rect(color.as_str(), constraints)?;
            }
        }
        Ok(())
    }
}

/// A loaded manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub config: GeneratorConfig,
    pub generators: Vec<GeneratorSpec>,
    pub layers: Vec<Layer>,
}

/// TOML structure for deserializing manifests
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlManifest {
    #[serde(default)]
    config: TomlConfig,
    #[serde(default)]
    generator: Vec<TomlGenerator>,
    #[serde(default)]
    layer: Vec<TomlLayer>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    add_extension: Option<bool>,
    timeout_ms: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlGenerator {
    #[serde(default)]
    densities: Vec<f64>,
    #[serde(default)]
    sizes: Vec<[f64; 2]>,
    #[serde(default)]
    caps: Vec<[f64; 2]>,
    #[serde(default)]
    formats: Vec<String>,
    #[serde(default)]
    filenames: Vec<String>,
    #[serde(default)]
    directories: Vec<String>,
    #[serde(default)]
    rotate: bool,
    #[serde(default)]
    matrix: Vec<Vec<f64>>,
    #[serde(default)]
    data: toml::Table,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayer {
    fill: Option<String>,
    repeat: Option<String>,
    place: Option<String>,
    rect: Option<String>,
    at: Option<String>,
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let parsed: TomlManifest = toml::from_str(content)?;

        let mut config = GeneratorConfig::new();
        if let Some(add_extension) = parsed.config.add_extension {
            config = config.with_add_extension(add_extension);
        }
        if let Some(ms) = parsed.config.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }

        let generators = parsed
            .generator
            .into_iter()
            .enumerate()
            .map(|(index, g)| convert_generator(index, g))
            .collect::<Result<Vec<_>, _>>()?;

        let layers = parsed
            .layer
            .into_iter()
            .enumerate()
            .map(|(index, l)| convert_layer(index, l))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            generators = generators.len(),
            layers = layers.len(),
            "loaded manifest"
        );

        Ok(Manifest {
            config,
            generators,
            layers,
        })
    }

    /// A synchronous session declaring one generator per manifest entry
    pub fn session(&self) -> Session<'_> {
        Session::new(
            self.config.clone(),
            Creator::sync(move |results| {
                for declared in &self.generators {
                    declared.apply(&results.create());
                }
            }),
        )
    }

    /// Run the session and return every variant
    pub fn variants(&self) -> Result<Vec<Variant>, GenerateError> {
        self.session().run()
    }

    /// Apply every layer to `canvas`, in order
    pub fn draw(&self, canvas: &mut Canvas<'_>) -> Result<(), DrawError> {
        self.layers.iter().try_for_each(|layer| layer.draw(canvas))
    }
}

fn convert_generator(index: usize, g: TomlGenerator) -> Result<GeneratorSpec, ManifestError> {
    let matrix = g
        .matrix
        .iter()
        .enumerate()
        .map(|(row, values)| match values.as_slice() {
            &[density, width, height] => Ok([density, width, height]),
            _ => Err(ManifestError::InvalidMatrixRow {
                generator: index,
                row,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = g
        .data
        .into_iter()
        .map(|(key, value)| match convert_value(&value) {
            Some(value) => Ok((key, value)),
            None => Err(ManifestError::InvalidData {
                generator: index,
                key,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratorSpec {
        densities: g.densities,
        sizes: g.sizes.into_iter().map(|[w, h]| (w, h)).collect(),
        caps: g.caps.into_iter().map(|[w, h]| (w, h)).collect(),
        formats: g.formats,
        filenames: g.filenames,
        directories: g.directories,
        rotate: g.rotate,
        matrix,
        data,
    })
}

fn convert_value(value: &toml::Value) -> Option<Value> {
    match value {
        toml::Value::Integer(n) => Some(Value::Number(*n as f64)),
        toml::Value::Float(n) => Some(Value::Number(*n)),
        toml::Value::String(s) => Some(Value::Text(s.clone())),
        toml::Value::Boolean(b) => Some(Value::Bool(*b)),
        toml::Value::Array(items) => match items.as_slice() {
            [a, b] => Some(Value::Pair(number(a)?, number(b)?)),
            _ => None,
        },
        _ => None,
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(n) => Some(*n as f64),
        toml::Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn convert_layer(index: usize, layer: TomlLayer) -> Result<Layer, ManifestError> {
    let invalid = |reason: &str| ManifestError::InvalidLayer {
        index,
        reason: reason.to_string(),
    };
    let constraints = |at: Option<String>| -> Result<Constraints, ManifestError> {
        let at = at.ok_or_else(|| invalid("`place` and `rect` layers require `at`"))?;
        parse_constraints(&at).map_err(|errors| ManifestError::Constraint {
            index,
            message: errors
                .iter()
                .map(|e| e.format(&at, "at"))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    };

    match (layer.fill, layer.repeat, layer.place, layer.rect) {
        (Some(color), None, None, None) if layer.at.is_none() => Ok(Layer::Fill { color }),
        (None, Some(source), None, None) if layer.at.is_none() => Ok(Layer::Repeat { source }),
        (Some(_), None, None, None) | (None, Some(_), None, None) => {
            Err(invalid("`at` only applies to `place` and `rect` layers"))
        }
        (None, None, Some(source), None) => Ok(Layer::Place {
            source,
            constraints: constraints(layer.at)?,
        }),
        (None, None, None, Some(color)) => Ok(Layer::Rect {
            color,
            constraints: constraints(layer.at)?,
        }),
        _ => Err(invalid(
            "expected exactly one of `fill`, `repeat`, `place` or `rect`",
        )),
    }
}

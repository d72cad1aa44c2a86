//! Variant records produced by a generator

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::ConfigurationError;
use super::value::Value;

/// One combination of the axis values, before augmentation
#[derive(Debug, Clone, PartialEq)]
pub struct RawVariant {
    pub density: f64,
    pub size: (f64, f64),
    pub caps: (f64, f64),
    pub format: String,
    pub filename: String,
    pub directory: String,
}

/// A fully augmented output file descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub density: f64,
    /// Declared size, before caps are subtracted
    pub size: (f64, f64),
    pub caps: (f64, f64),
    pub format: String,
    pub filename: String,
    pub directory: String,

    pub original_width: f64,
    pub original_height: f64,
    pub original_ratio: f64,
    /// Effective width (size minus caps)
    pub width: f64,
    /// Effective height (size minus caps)
    pub height: f64,
    pub ratio: f64,

    pub square: bool,
    pub portrait: bool,
    pub landscape: bool,
    pub retina: bool,
    pub not_retina: bool,
    pub xhdpi: bool,
    pub hdpi: bool,
    pub mdpi: bool,
    pub ldpi: bool,
    pub long: bool,
    pub notlong: bool,

    /// Fields written by data entries and procedures that are not built in
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,

    /// Relative output path
    pub path: String,
}

/// Larger side over smaller side
pub(crate) fn ratio(a: f64, b: f64) -> f64 {
    if a > b {
        a / b
    } else {
        b / a
    }
}

impl Variant {
    /// Derive the metadata of a raw combination
    pub fn from_raw(raw: RawVariant) -> Self {
        let (original_width, original_height) = raw.size;
        let width = original_width - raw.caps.0;
        let height = original_height - raw.caps.1;
        let original_ratio = ratio(original_width, original_height);
        let density = raw.density;
        let long = original_ratio > 1.5;

        Self {
            density,
            size: raw.size,
            caps: raw.caps,
            format: raw.format,
            filename: raw.filename,
            directory: raw.directory,
            original_width,
            original_height,
            original_ratio,
            width,
            height,
            ratio: ratio(width, height),
            square: width == height,
            portrait: width < height,
            landscape: width > height,
            retina: density == 2.0,
            not_retina: density != 2.0,
            xhdpi: density == 2.0,
            hdpi: density == 1.5,
            mdpi: density == 1.0,
            ldpi: density == 0.75,
            long,
            notlong: !long,
            fields: BTreeMap::new(),
            path: String::new(),
        }
    }

    /// Read a field by name
    ///
    /// Built-in fields accept both their snake_case and camelCase spelling.
    pub fn get(&self, name: &str) -> Option<Value> {
        let value = match name {
            "density" => Value::Number(self.density),
            "size" => Value::Pair(self.size.0, self.size.1),
            "caps" => Value::Pair(self.caps.0, self.caps.1),
            "format" => Value::Text(self.format.clone()),
            "filename" => Value::Text(self.filename.clone()),
            "directory" => Value::Text(self.directory.clone()),
            "path" => Value::Text(self.path.clone()),
            "original_width" | "originalWidth" => Value::Number(self.original_width),
            "original_height" | "originalHeight" => Value::Number(self.original_height),
            "original_ratio" | "originalRatio" => Value::Number(self.original_ratio),
            "width" => Value::Number(self.width),
            "height" => Value::Number(self.height),
            "ratio" => Value::Number(self.ratio),
            "square" => Value::Bool(self.square),
            "portrait" => Value::Bool(self.portrait),
            "landscape" => Value::Bool(self.landscape),
            "retina" => Value::Bool(self.retina),
            "not_retina" | "notRetina" => Value::Bool(self.not_retina),
            "xhdpi" => Value::Bool(self.xhdpi),
            "hdpi" => Value::Bool(self.hdpi),
            "mdpi" => Value::Bool(self.mdpi),
            "ldpi" => Value::Bool(self.ldpi),
            "long" => Value::Bool(self.long),
            "notlong" => Value::Bool(self.notlong),
            other => return self.fields.get(other).cloned(),
        };
        Some(value)
    }

    /// Write a field by name
    ///
    /// Built-in fields keep their type; anything else lands in
    /// [`Variant::fields`].
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ConfigurationError> {
        match name {
            "density" => self.density = number(name, value)?,
            "size" => self.size = pair(name, value)?,
            "caps" => self.caps = pair(name, value)?,
            "format" => self.format = text(name, value)?,
            "filename" => self.filename = text(name, value)?,
            "directory" => self.directory = text(name, value)?,
            "path" => self.path = text(name, value)?,
            "original_width" | "originalWidth" => self.original_width = number(name, value)?,
            "original_height" | "originalHeight" => self.original_height = number(name, value)?,
            "original_ratio" | "originalRatio" => self.original_ratio = number(name, value)?,
            "width" => self.width = number(name, value)?,
            "height" => self.height = number(name, value)?,
            "ratio" => self.ratio = number(name, value)?,
            "square" => self.square = boolean(name, value)?,
            "portrait" => self.portrait = boolean(name, value)?,
            "landscape" => self.landscape = boolean(name, value)?,
            "retina" => self.retina = boolean(name, value)?,
            "not_retina" | "notRetina" => self.not_retina = boolean(name, value)?,
            "xhdpi" => self.xhdpi = boolean(name, value)?,
            "hdpi" => self.hdpi = boolean(name, value)?,
            "mdpi" => self.mdpi = boolean(name, value)?,
            "ldpi" => self.ldpi = boolean(name, value)?,
            "long" => self.long = boolean(name, value)?,
            "notlong" => self.notlong = boolean(name, value)?,
            other => {
                self.fields.insert(other.to_string(), value);
            }
        }
        Ok(())
    }
}

fn number(field: &str, value: Value) -> Result<f64, ConfigurationError> {
    value
        .as_number()
        .ok_or_else(|| ConfigurationError::field_type(field, "a number", value.kind()))
}

fn pair(field: &str, value: Value) -> Result<(f64, f64), ConfigurationError> {
    value
        .as_pair()
        .ok_or_else(|| ConfigurationError::field_type(field, "a pair", value.kind()))
}

fn boolean(field: &str, value: Value) -> Result<bool, ConfigurationError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigurationError::field_type(field, "a boolean", value.kind()))
}

fn text(field: &str, value: Value) -> Result<String, ConfigurationError> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(ConfigurationError::field_type(field, "text", other.kind())),
    }
}

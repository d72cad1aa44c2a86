//! Turning raw combinations into full variant records

use super::error::ConfigurationError;
use super::variant::{RawVariant, Variant};
use super::variant_generator::{DataValue, VariantGenerator};

/// Derive metadata, apply data and procedures, then compute the path
///
/// Data entries run first, then procedures in registration order. Every
/// procedure sees the fields written by the ones before it.
pub(crate) fn augment(
    generator: &VariantGenerator,
    raw: RawVariant,
) -> Result<Variant, ConfigurationError> {
    let mut variant = Variant::from_raw(raw);

    for (key, value) in generator.data_entries() {
        let value = match value {
            DataValue::Static(v) => Some(v.clone()),
            DataValue::Computed(f) => f(&variant, generator),
        };
        if let Some(value) = value {
            variant.set(key, value)?;
        }
    }

    for (name, functions) in generator.procedure_entries() {
        for f in functions {
            if let Some(value) = f(&variant, generator) {
                variant.set(name, value)?;
            }
        }
    }

    variant.path = build_path(
        &variant.directory,
        &variant.filename,
        &variant.format,
        generator.config().add_extension,
    );
    Ok(variant)
}

/// `directory/filename[.format]` with the format lower-cased
pub fn build_path(directory: &str, filename: &str, format: &str, add_extension: bool) -> String {
    let file = if add_extension {
        format!("{}.{}", filename, format.to_lowercase())
    } else {
        filename.to_string()
    };
    join_path(directory, &file)
}

/// Join two path fragments with `/` and normalise `.` and `..` segments
pub fn join_path(left: &str, right: &str) -> String {
    let absolute = left.starts_with('/') || (left.is_empty() && right.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();

    for segment in left.split('/').chain(right.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

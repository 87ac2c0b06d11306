//! # Resource Classification
//!
//! Decodes one document span, normalizes it, and pulls out the `kind` and
//! `apiVersion` that select its schema. A document that is blank, comment
//! only, or anything other than a non-empty mapping is an empty slot, not
//! an error.

use serde::Deserialize;
use serde_json::Value;

use crate::document::Document;
use crate::error::ResourceError;
use crate::normalize::normalize;

/// Field holding the resource kind.
pub const KIND_FIELD: &str = "kind";
/// Field holding the resource API version.
pub const API_VERSION_FIELD: &str = "apiVersion";

/// A classified document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// Nothing to validate.
    Empty,
    /// A Kubernetes object ready for schema lookup.
    Manifest(Manifest),
}

/// A Kubernetes object with its identifying fields extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Value of `kind`, as written.
    pub kind: String,
    /// Value of `apiVersion`, as written.
    pub api_version: String,
    /// The whole normalized document.
    pub body: Value,
}

/// Decodes and classifies a document.
///
/// # Errors
///
/// - [`ResourceError::Decode`] if the span is not valid YAML, holds more than
///   one non-null YAML document, or contains values JSON cannot represent.
/// - [`ResourceError::MissingField`] if `kind` or `apiVersion` is absent or
///   null.
/// - [`ResourceError::FieldType`] if either is not a string.
pub fn parse_resource(document: &Document<'_>) -> Result<Resource, ResourceError> {
    if document.is_blank() {
        return Ok(Resource::Empty);
    }

    let yaml = decode(document)?;
    let body = normalize(&yaml).map_err(|e| ResourceError::Decode {
        file_name: document.file_name.to_string(),
        reason: e.to_string(),
    })?;

    match &body {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Ok(Resource::Empty),
    }

    let kind = required_string(&body, KIND_FIELD, document.file_name)?;
    let api_version = required_string(&body, API_VERSION_FIELD, document.file_name)?;

    Ok(Resource::Manifest(Manifest {
        kind,
        api_version,
        body,
    }))
}

/// Decodes the span as a single YAML document.
///
/// Extra documents that decode to null are ignored, so a span ending in a
/// bare `---` marker (no final newline, or trailing spaces) still decodes.
/// Zero non-null documents decode to null.
fn decode(document: &Document<'_>) -> Result<serde_yaml::Value, ResourceError> {
    let decode_error = |reason: String| ResourceError::Decode {
        file_name: document.file_name.to_string(),
        reason,
    };

    let mut decoded = serde_yaml::Value::Null;
    for part in serde_yaml::Deserializer::from_slice(document.bytes) {
        let value =
            serde_yaml::Value::deserialize(part).map_err(|e| decode_error(e.to_string()))?;
        if value.is_null() {
            continue;
        }
        if !decoded.is_null() {
            return Err(decode_error(
                "more than one YAML document in a single span".to_string(),
            ));
        }
        decoded = value;
    }
    Ok(decoded)
}

fn required_string(
    body: &Value,
    field: &'static str,
    file_name: &str,
) -> Result<String, ResourceError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ResourceError::MissingField {
            file_name: file_name.to_string(),
            field,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ResourceError::FieldType {
            file_name: file_name.to_string(),
            field,
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

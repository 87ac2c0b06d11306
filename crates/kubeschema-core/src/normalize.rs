//! # YAML Normalization
//!
//! Converts a decoded YAML tree into a `serde_json::Value` so it can be fed
//! to a JSON Schema validator. YAML allows mapping keys of any type; JSON
//! objects only allow strings, so scalar keys are rendered to their string
//! form. Collection keys have no sensible string form and are rejected.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;
use thiserror::Error;

/// A YAML value with no JSON representation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A mapping key that is itself a sequence or mapping.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// NaN or infinite float.
    #[error("cannot represent float {0} in JSON")]
    NonFiniteFloat(String),
}

/// Normalizes a YAML tree: string keys everywhere, tags dropped.
pub fn normalize(yaml: &Yaml) -> Result<Value, NormalizeError> {
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::Number(n) => normalize_number(n),
        Yaml::String(s) => Ok(Value::String(s.clone())),
        Yaml::Sequence(seq) => seq
            .iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Mapping(map) => {
            let mut object = Map::with_capacity(map.len());
            for (k, v) in map {
                object.insert(normalize_key(k)?, normalize(v)?);
            }
            Ok(Value::Object(object))
        }
        Yaml::Tagged(tagged) => normalize(&tagged.value),
    }
}

fn normalize_number(n: &serde_yaml::Number) -> Result<Value, NormalizeError> {
    if let Some(i) = n.as_i64() {
        Ok(Value::Number(Number::from(i)))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::Number(Number::from(u)))
    } else {
        let f = n.as_f64().unwrap_or(f64::NAN);
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| NormalizeError::NonFiniteFloat(n.to_string()))
    }
}

/// Renders a mapping key as a string.
///
/// `true: x` becomes `"true"`, `1: x` becomes `"1"` and `~: x` becomes
/// `"null"`.
pub fn normalize_key(key: &Yaml) -> Result<String, NormalizeError> {
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => normalize_key(&tagged.value),
        other @ (Yaml::Sequence(_) | Yaml::Mapping(_)) => Err(NormalizeError::UnsupportedKey(
            serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| format!("{other:?}")),
        )),
    }
}

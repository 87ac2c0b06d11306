//! # Error Types
//!
//! Every failure that can befall a single manifest document, plus the
//! accumulating [`ValidationErrors`] that carries all of them across a
//! stream or a whole run.
//!
//! ## Design
//!
//! - A schema *violation* is not an error. A resource that loads its schema
//!   and fails it is a successful validation carrying violations.
//! - Per-document errors never cross document boundaries; they are collected
//!   into [`ValidationErrors`] by the caller.

use std::fmt;

use thiserror::Error;

/// Failure to process one manifest document.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The document is not well-formed YAML, or holds values with no JSON
    /// representation.
    #[error("failed to decode YAML from {file_name}: {reason}")]
    Decode {
        /// Source file the document came from.
        file_name: String,
        /// Parser or normalization message.
        reason: String,
    },

    /// `kind` or `apiVersion` is absent or null.
    #[error("missing {field} in {file_name}")]
    MissingField {
        /// Source file the document came from.
        file_name: String,
        /// The field that was not found.
        field: &'static str,
    },

    /// `kind` or `apiVersion` is present but not a string.
    #[error("{field} in {file_name} must be a string, found {found}")]
    FieldType {
        /// Source file the document came from.
        file_name: String,
        /// The offending field.
        field: &'static str,
        /// JSON type name of the value that was found.
        found: &'static str,
    },

    /// The schema could not be fetched or compiled.
    #[error("failed to load schema from {url}: {source}")]
    Schema {
        /// Resolved schema URL.
        url: String,
        /// Underlying schema failure.
        source: SchemaError,
    },
}

impl ResourceError {
    /// Short, stable name of the error class.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode",
            Self::MissingField { .. } => "missing-field",
            Self::FieldType { .. } => "field-type",
            Self::Schema { .. } => "schema",
        }
    }
}

/// Failure to load or compile a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The schema host answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
    },

    /// No schema is registered under the URL.
    #[error("no schema registered for this location")]
    NotFound,

    /// Reading a local schema file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema body is not JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The schema is JSON but not a usable JSON Schema.
    #[error("invalid schema: {0}")]
    Compile(String),
}

/// A [`ResourceError`] pinned to the document that raised it.
#[derive(Error, Debug)]
#[error("document {}: {error}", .index + 1)]
pub struct DocumentError {
    /// Zero-based position of the document within its stream.
    pub index: usize,
    /// What went wrong.
    #[source]
    pub error: ResourceError,
}

/// Every per-document failure of a stream (or a whole run), in input order.
///
/// Never empty: callers hold an `Option<ValidationErrors>` that is `Some`
/// only when at least one document failed.
#[derive(Debug)]
pub struct ValidationErrors {
    errors: Vec<DocumentError>,
}

impl ValidationErrors {
    /// Wraps a non-empty list, returning `None` for an empty one.
    pub fn from_vec(errors: Vec<DocumentError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Number of failed documents.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all failures.
    pub fn errors(&self) -> &[DocumentError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<DocumentError> {
        self.errors
    }

    /// Appends every failure of `other`, keeping order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Merges `other` into an optional accumulator.
    pub fn accumulate(acc: &mut Option<ValidationErrors>, other: Option<ValidationErrors>) {
        match (acc.as_mut(), other) {
            (Some(existing), Some(other)) => existing.merge(other),
            (None, Some(other)) => *acc = Some(other),
            (_, None) => {}
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.len() == 1 {
            write!(f, "1 error occurred:")?;
        } else {
            write!(f, "{} errors occurred:", self.errors.len())?;
        }
        for e in &self.errors {
            write!(f, "\n\t* {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = DocumentError;
    type IntoIter = std::vec::IntoIter<DocumentError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

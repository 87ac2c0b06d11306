//! # Resource Validation
//!
//! Runs each document of a manifest stream through
//! decode → normalize → classify → resolve schema → validate, and gathers
//! the outcomes.
//!
//! ## Partial Failure
//!
//! A document that cannot be processed (bad YAML, missing `kind`, schema
//! unavailable) fails on its own. Its siblings are still validated, and
//! every failure is kept in the stream's [`ValidationErrors`].
//!
//! ## Schema Compilation
//!
//! Schemas are compiled as JSON Schema draft 4, the dialect of the
//! Kubernetes standalone-strict schemas, with the OpenAPI formats
//! `int32`, `int64`, `byte` and `int-or-string` accepted as-is. Compiled
//! schemas are cached per URL for the lifetime of the validator; failed
//! loads are not cached.

use std::collections::HashMap;
use std::sync::Arc;

use jsonschema::{Draft, Validator};
use kubeschema_core::{
    parse_resource, split_documents, Document, DocumentError, Manifest, Resource, ResourceError,
    SchemaError, SchemaLocator, ValidationErrors, ValidationResult, Violation,
};
use parking_lot::Mutex;
use serde_json::Value;

use crate::fetch::SchemaFetcher;

/// Validates manifests against schemas resolved by a [`SchemaLocator`].
pub struct ResourceValidator<F> {
    locator: SchemaLocator,
    fetcher: F,
    compiled: Mutex<HashMap<String, Arc<Validator>>>,
}

impl<F> std::fmt::Debug for ResourceValidator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceValidator")
            .field("locator", &self.locator)
            .field("cached_schemas", &self.compiled.lock().len())
            .finish()
    }
}

impl<F: SchemaFetcher> ResourceValidator<F> {
    /// Validator with an empty schema cache.
    pub fn new(locator: SchemaLocator, fetcher: F) -> Self {
        Self {
            locator,
            fetcher,
            compiled: Mutex::new(HashMap::new()),
        }
    }

    /// The locator this validator resolves schema URLs with.
    pub fn locator(&self) -> &SchemaLocator {
        &self.locator
    }

    /// Validates every document of `input` in order.
    ///
    /// `results` always holds one entry per document; a failed document
    /// contributes a placeholder carrying only the file name.
    pub fn validate(&self, input: &[u8], file_name: &str) -> FileValidation {
        let documents = split_documents(input, file_name);
        let mut results = Vec::with_capacity(documents.len());
        let mut errors = Vec::new();

        for document in &documents {
            match self.validate_resource(document) {
                Ok(result) => results.push(result),
                Err(error) => {
                    tracing::debug!(
                        file = file_name,
                        document = document.index,
                        class = error.class(),
                        "{error}"
                    );
                    results.push(ValidationResult::empty(file_name));
                    errors.push(DocumentError {
                        index: document.index,
                        error,
                    });
                }
            }
        }

        FileValidation {
            results,
            errors: ValidationErrors::from_vec(errors),
        }
    }

    /// Validates a single document.
    ///
    /// A schema-invalid resource is `Ok` with violations in
    /// [`ValidationResult::errors`]; `Err` means the document could not be
    /// validated at all.
    pub fn validate_resource(
        &self,
        document: &Document<'_>,
    ) -> Result<ValidationResult, ResourceError> {
        let manifest = match parse_resource(document)? {
            Resource::Empty => {
                tracing::debug!(
                    file = document.file_name,
                    document = document.index,
                    "empty document"
                );
                return Ok(ValidationResult::empty(document.file_name));
            }
            Resource::Manifest(manifest) => manifest,
        };

        let violations = self.check(&manifest)?;
        Ok(ValidationResult::validated(
            document.file_name,
            manifest.kind,
            manifest.api_version,
            violations,
        ))
    }

    /// Runs the schema for `manifest`, returning its violations.
    pub fn check(&self, manifest: &Manifest) -> Result<Vec<Violation>, ResourceError> {
        let url = self
            .locator
            .schema_url(&manifest.kind, &manifest.api_version);
        let validator = self
            .compiled_schema(&url)
            .map_err(|source| ResourceError::Schema {
                url: url.clone(),
                source,
            })?;

        let violations: Vec<Violation> = validator
            .iter_errors(&manifest.body)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        tracing::debug!(
            kind = %manifest.kind,
            api_version = %manifest.api_version,
            url = %url,
            violations = violations.len(),
            "validated resource"
        );
        Ok(violations)
    }

    /// Number of distinct schemas compiled so far.
    pub fn cached_schema_count(&self) -> usize {
        self.compiled.lock().len()
    }

    fn compiled_schema(&self, url: &str) -> Result<Arc<Validator>, SchemaError> {
        if let Some(hit) = self.compiled.lock().get(url) {
            tracing::trace!(url, "schema cache hit");
            return Ok(Arc::clone(hit));
        }

        let schema = self.fetcher.fetch(url)?;
        let validator = Arc::new(compile(&schema)?);
        self.compiled
            .lock()
            .insert(url.to_string(), Arc::clone(&validator));
        Ok(validator)
    }
}

/// Compiles a Kubernetes schema document.
pub fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::options()
        .with_draft(Draft::Draft4)
        .with_format("int64", any_format)
        .with_format("int32", any_format)
        .with_format("byte", any_format)
        .with_format("int-or-string", any_format)
        .build(schema)
        .map_err(|e| SchemaError::Compile(e.to_string()))
}

/// Kubernetes OpenAPI formats have no JSON Schema definition; accept them.
fn any_format(_: &str) -> bool {
    true
}

/// Outcome of validating one manifest stream.
#[derive(Debug)]
pub struct FileValidation {
    /// One result per document, in stream order.
    pub results: Vec<ValidationResult>,
    /// Every document failure, or `None` if all documents were processed.
    pub errors: Option<ValidationErrors>,
}

impl FileValidation {
    /// True if no document failed and no resource violated its schema.
    pub fn is_success(&self) -> bool {
        self.errors.is_none() && self.results.iter().all(ValidationResult::is_ok)
    }

    /// The failure recorded for the document at `index`, if any.
    pub fn error_for(&self, index: usize) -> Option<&DocumentError> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.errors().iter().find(|e| e.index == index))
    }

    /// Splits into the result list and the combined error.
    pub fn into_parts(self) -> (Vec<ValidationResult>, Result<(), ValidationErrors>) {
        let status = match self.errors {
            Some(errors) => Err(errors),
            None => Ok(()),
        };
        (self.results, status)
    }
}

//! # kubeschema-schema — Schema Loading & Validation
//!
//! Validates Kubernetes manifests against the standalone-strict JSON
//! schemas published per Kubernetes version.
//!
//! ## Schema Sources (`fetch`)
//!
//! [`SchemaFetcher`] is the seam between validation and schema storage.
//! [`DefaultSchemaFetcher`] downloads over HTTP(S) and reads `file://` URLs
//! or plain paths from a local mirror; [`StaticSchemaFetcher`] serves a
//! bundled set from memory.
//!
//! ## Validation (`validate`)
//!
//! [`ResourceValidator::validate`] splits a manifest stream, validates each
//! document, and returns a [`FileValidation`] holding one
//! [`ValidationResult`](kubeschema_core::ValidationResult) per document plus
//! every per-document failure.
//!
//! ```no_run
//! use kubeschema_core::{LocatorConfig, SchemaLocator};
//! use kubeschema_schema::{DefaultSchemaFetcher, HttpSchemaFetcher, ResourceValidator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locator = SchemaLocator::from_env(&LocatorConfig::default());
//! let fetcher = DefaultSchemaFetcher::new(HttpSchemaFetcher::new()?);
//! let validator = ResourceValidator::new(locator, fetcher);
//!
//! let outcome = validator.validate(b"apiVersion: v1\nkind: Service\n", "svc.yaml");
//! for result in &outcome.results {
//!     println!("{} {}: {} violation(s)", result.kind, result.api_version, result.errors.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod fetch;
pub mod validate;

pub use fetch::{
    DefaultSchemaFetcher, FileSchemaFetcher, HttpSchemaFetcher, SchemaFetcher,
    StaticSchemaFetcher, DEFAULT_TIMEOUT_SECS,
};
pub use validate::{compile, FileValidation, ResourceValidator};

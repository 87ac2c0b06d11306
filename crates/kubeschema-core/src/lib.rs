//! # kubeschema-core — Manifest Parsing & Schema Location
//!
//! I/O-free building blocks for validating Kubernetes manifests:
//!
//! - [`document`] splits a multi-document YAML stream on `---` lines,
//!   keeping empty slots.
//! - [`normalize`] turns a YAML tree into a JSON value with string keys.
//! - [`resource`] classifies a document as empty or as a manifest with
//!   `kind` and `apiVersion`.
//! - [`locator`] derives the standalone-strict schema URL for a manifest
//!   and resolves the version/base-URL configuration.
//! - [`result`] and [`error`] hold the per-document outcome and failure
//!   types.
//!
//! ## Crate Policy
//!
//! - No network or filesystem access; schema loading lives in
//!   `kubeschema-schema`.
//! - The schema URL layout is an external contract. Changes to
//!   [`locator::schema_url`] must keep the table in its module docs green.

pub mod document;
pub mod error;
pub mod locator;
pub mod normalize;
pub mod resource;
pub mod result;

pub use document::{split_documents, Document};
pub use error::{DocumentError, ResourceError, SchemaError, ValidationErrors};
pub use locator::{LocatorConfig, SchemaLocator};
pub use resource::{parse_resource, Manifest, Resource};
pub use result::{ResultStatus, ValidationResult, Violation};

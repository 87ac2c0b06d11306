//! # kubeschema-cli — Kubernetes Manifest Validation CLI
//!
//! Provides the `kubeschema` command, which validates Kubernetes YAML
//! manifests against the standalone-strict JSON schemas of a chosen
//! Kubernetes version:
//!
//! ```bash
//! kubeschema deploy.yaml service.yaml
//! kubeschema -v 1.18.0 deploy.yaml
//! helm template ./chart | kubeschema -f chart.yaml
//! KUBESCHEMA_SCHEMA_LOCATION=file:///srv/schemas kubeschema deploy.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation lives in `kubeschema-schema`.
//! - Report lines are written to stdout, diagnostics go through `tracing`
//!   to stderr.

pub mod validate;

//! # Schema Location
//!
//! Derives the schema URL for a resource from its `kind` and `apiVersion`.
//! The URL layout is the contract with the public schema host:
//!
//! ```text
//! {base}/{version}-standalone-strict/{kind}{suffix}.json
//! ```
//!
//! | apiVersion                     | suffix                  |
//! |--------------------------------|-------------------------|
//! | `v1`                           | `-v1`                   |
//! | `apps/v1`                      | `-apps-v1`              |
//! | `storage.k8s.io/v1`            | `-storage-v1`           |
//! | `apiextensions.k8s.io/v1beta1` | `-apiextensions-v1beta1`|
//!
//! ## Configuration Precedence
//!
//! Both the base URL and the Kubernetes version resolve through three tiers:
//! environment, then explicit configuration, then the built-in default. The
//! environment tier is captured once into a [`LocatorConfig`] so that
//! resolution never reads process state on its own.

/// Public schema host used when nothing else is configured.
pub const DEFAULT_SCHEMA_LOCATION: &str = "https://kubernetesjsonschema.dev";

/// Kubernetes version used when nothing else is configured.
pub const DEFAULT_KUBERNETES_VERSION: &str = "master";

/// Environment variable overriding the schema base URL.
pub const SCHEMA_LOCATION_ENV: &str = "KUBESCHEMA_SCHEMA_LOCATION";

/// Environment variable overriding the Kubernetes version.
pub const KUBERNETES_VERSION_ENV: &str = "KUBESCHEMA_KUBERNETES_VERSION";

const SCHEMA_VARIANT: &str = "standalone-strict";

/// One tier of locator configuration. Unset or empty fields defer to the
/// next tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Kubernetes version, without the `v` prefix (e.g. `1.18.0`), or `master`.
    pub kubernetes_version: Option<String>,
    /// Base URL of the schema host.
    pub schema_location: Option<String>,
}

impl LocatorConfig {
    /// Reads the environment tier.
    pub fn from_env() -> Self {
        Self {
            kubernetes_version: std::env::var(KUBERNETES_VERSION_ENV).ok(),
            schema_location: std::env::var(SCHEMA_LOCATION_ENV).ok(),
        }
    }

    fn version(&self) -> Option<&str> {
        non_empty(self.kubernetes_version.as_deref())
    }

    fn location(&self) -> Option<&str> {
        non_empty(self.schema_location.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Resolved, immutable schema location settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocator {
    kubernetes_version: String,
    base_url: String,
}

impl Default for SchemaLocator {
    fn default() -> Self {
        Self::new(DEFAULT_KUBERNETES_VERSION, DEFAULT_SCHEMA_LOCATION)
    }
}

impl SchemaLocator {
    /// Builds a locator from already-resolved values.
    pub fn new(kubernetes_version: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            kubernetes_version: kubernetes_version.into(),
            base_url: base_url.into(),
        }
    }

    /// Resolves each setting as `env`, else `explicit`, else the default.
    pub fn resolve(explicit: &LocatorConfig, env: &LocatorConfig) -> Self {
        let kubernetes_version = env
            .version()
            .or_else(|| explicit.version())
            .unwrap_or(DEFAULT_KUBERNETES_VERSION);
        let base_url = env
            .location()
            .or_else(|| explicit.location())
            .unwrap_or(DEFAULT_SCHEMA_LOCATION);
        Self::new(kubernetes_version, base_url)
    }

    /// Resolves against the current process environment.
    pub fn from_env(explicit: &LocatorConfig) -> Self {
        Self::resolve(explicit, &LocatorConfig::from_env())
    }

    /// The configured Kubernetes version, as given.
    pub fn kubernetes_version(&self) -> &str {
        &self.kubernetes_version
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Schema URL for a resource.
    pub fn schema_url(&self, kind: &str, api_version: &str) -> String {
        schema_url(&self.base_url, &self.kubernetes_version, kind, api_version)
    }
}

/// `master` stays as is; any other version gets the `v` tag prefix.
pub fn normalized_version(version: &str) -> String {
    if version == DEFAULT_KUBERNETES_VERSION {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

/// File-name suffix selected by an `apiVersion`.
///
/// Only the first dot-delimited segment of the group is used, so
/// `storage.k8s.io/v1` renders `-storage-v1`.
pub fn kind_suffix(api_version: &str) -> String {
    let mut parts = api_version.split('/');
    let group = parts.next().unwrap_or_default();
    let group_head = group.split('.').next().unwrap_or_default();
    match parts.next() {
        None => format!("-{}", group_head.to_lowercase()),
        Some(version) => format!(
            "-{}-{}",
            group_head.to_lowercase(),
            version.to_lowercase()
        ),
    }
}

/// Full schema URL for `kind`/`api_version` under `base_url` and `version`.
pub fn schema_url(base_url: &str, version: &str, kind: &str, api_version: &str) -> String {
    format!(
        "{base_url}/{}-{SCHEMA_VARIANT}/{}{}.json",
        normalized_version(version),
        kind.to_lowercase(),
        kind_suffix(api_version),
    )
}

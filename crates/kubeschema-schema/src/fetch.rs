//! # Schema Sources
//!
//! A [`SchemaFetcher`] turns a schema URL into a parsed JSON document. The
//! validator only depends on the trait; which source backs it is the
//! caller's choice:
//!
//! - [`HttpSchemaFetcher`]: blocking GET against the schema host.
//! - [`FileSchemaFetcher`]: `file://` URLs or bare paths into a local
//!   mirror of the schema host's layout.
//! - [`StaticSchemaFetcher`]: an in-memory set keyed by URL.
//! - [`DefaultSchemaFetcher`]: picks HTTP or file by URL scheme.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use kubeschema_core::SchemaError;
use serde_json::Value;
use url::Url;

/// Default per-request timeout for schema downloads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Loads a schema document by URL.
pub trait SchemaFetcher {
    /// Fetches and parses the schema at `url`.
    fn fetch(&self, url: &str) -> Result<Value, SchemaError>;
}

impl<F: SchemaFetcher + ?Sized> SchemaFetcher for &F {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        (**self).fetch(url)
    }
}

impl<F: SchemaFetcher + ?Sized> SchemaFetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        (**self).fetch(url)
    }
}

// ─── HTTP ───────────────────────────────────────────────────────────────

/// Blocking HTTP(S) schema fetcher.
#[derive(Debug, Clone)]
pub struct HttpSchemaFetcher {
    client: reqwest::blocking::Client,
}

impl HttpSchemaFetcher {
    /// Builds a fetcher with the default timeout.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Builds a fetcher with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SchemaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kubeschema/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SchemaError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl SchemaFetcher for HttpSchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        tracing::debug!(url, "downloading schema");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| SchemaError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SchemaError::Status {
                status: status.as_u16(),
            });
        }

        resp.json::<Value>()
            .map_err(|e| SchemaError::InvalidJson(e.to_string()))
    }
}

// ─── Local files ────────────────────────────────────────────────────────

/// Reads schemas from disk. Accepts `file://` URLs and plain paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSchemaFetcher;

impl FileSchemaFetcher {
    /// Maps a `file://` URL or a plain path to a filesystem path.
    pub fn path_for(location: &str) -> Result<PathBuf, SchemaError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| {
                SchemaError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a local file URL: {location}"),
                ))
            }),
            _ => Ok(PathBuf::from(location)),
        }
    }
}

impl SchemaFetcher for FileSchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        let path = Self::path_for(url)?;
        tracing::debug!(path = %path.display(), "reading schema");
        let bytes = std::fs::read(&path)?;
        serde_json::from_slice(&bytes).map_err(|e| SchemaError::InvalidJson(e.to_string()))
    }
}

// ─── Bundled set ────────────────────────────────────────────────────────

/// Serves schemas from memory, keyed by exact URL.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaFetcher {
    schemas: HashMap<String, Value>,
}

impl StaticSchemaFetcher {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, schema: Value) {
        self.schemas.insert(url.into(), schema);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_schema(mut self, url: impl Into<String>, schema: Value) -> Self {
        self.insert(url, schema);
        self
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaFetcher for StaticSchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        self.schemas.get(url).cloned().ok_or(SchemaError::NotFound)
    }
}

// ─── Scheme dispatch ────────────────────────────────────────────────────

/// HTTP for `http`/`https` URLs, the filesystem for everything else.
#[derive(Debug, Clone)]
pub struct DefaultSchemaFetcher {
    http: HttpSchemaFetcher,
    file: FileSchemaFetcher,
}

impl DefaultSchemaFetcher {
    /// Dispatches to `http` for HTTP(S) URLs and to the filesystem otherwise.
    pub fn new(http: HttpSchemaFetcher) -> Self {
        Self {
            http,
            file: FileSchemaFetcher,
        }
    }
}

impl SchemaFetcher for DefaultSchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Value, SchemaError> {
        if is_http(url) {
            self.http.fetch(url)
        } else {
            self.file.fetch(url)
        }
    }
}

fn is_http(location: &str) -> bool {
    Url::parse(location).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

//! # Validate Command
//!
//! Reads manifest streams from files or stdin, validates every document,
//! and prints one line per result:
//!
//! ```text
//! The file deploy.yaml contains a valid Deployment
//! The file deploy.yaml contains an invalid Service
//! --> /spec/ports/0/port: "http" is not of type "integer"
//! The file deploy.yaml is empty
//! ERROR: document 4: missing kind in deploy.yaml
//! ```
//!
//! Files are processed in argument order and a failing file or document
//! never stops the run. The exit code is 1 if anything was invalid or
//! could not be validated.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;

use kubeschema_core::{LocatorConfig, ResultStatus, SchemaLocator, ValidationErrors};
use kubeschema_schema::{
    DefaultSchemaFetcher, FileValidation, HttpSchemaFetcher, ResourceValidator, SchemaFetcher,
    DEFAULT_TIMEOUT_SECS,
};

/// Display name used for stdin when `--filename` is not given.
pub const STDIN_DISPLAY_NAME: &str = "from stdin";

/// Arguments for validating manifests.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifest files to validate. Reads stdin when empty or `-`.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Kubernetes version to validate against (e.g. 1.18.0, or master).
    /// Overridden by KUBESCHEMA_KUBERNETES_VERSION.
    #[arg(short = 'v', long, value_name = "VERSION")]
    pub kubernetes_version: Option<String>,

    /// Base URL used to download schemas; file:// URLs and directories
    /// also work. Overridden by KUBESCHEMA_SCHEMA_LOCATION.
    #[arg(long, value_name = "URL")]
    pub schema_location: Option<String>,

    /// File name to display for YAML read from stdin.
    #[arg(
        short = 'f',
        long,
        env = "KUBESCHEMA_FILENAME",
        default_value = STDIN_DISPLAY_NAME
    )]
    pub filename: String,

    /// Schema download timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl ValidateArgs {
    /// The explicit configuration tier carried by the flags.
    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            kubernetes_version: self.kubernetes_version.clone(),
            schema_location: self.schema_location.clone(),
        }
    }

    /// True when the manifests come from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.files.first().map_or(true, |f| f.as_os_str() == "-")
    }
}

/// One manifest stream to validate.
#[derive(Debug)]
pub struct Source {
    /// Name shown in the report.
    pub name: String,
    /// Stream contents, or why they could not be read.
    pub contents: io::Result<Vec<u8>>,
}

/// Totals over a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Results reported, across all sources.
    pub results: usize,
    /// Results that violated their schema.
    pub invalid: usize,
    /// Sources that could not be read.
    pub unreadable: usize,
    /// Every per-document failure, across all sources.
    pub errors: Option<ValidationErrors>,
}

impl RunSummary {
    /// True when every result was valid or empty and no source failed.
    pub fn is_success(&self) -> bool {
        self.invalid == 0 && self.unreadable == 0 && self.errors.is_none()
    }

    /// Process exit code for this run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Execute validation with the process environment, stdin, and stdout.
///
/// Returns exit code: 0 when everything is valid or empty, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let locator = SchemaLocator::from_env(&args.locator_config());
    tracing::info!(
        kubernetes_version = locator.kubernetes_version(),
        schema_location = locator.base_url(),
        "resolved schema location"
    );

    let http = HttpSchemaFetcher::with_timeout(Duration::from_secs(args.timeout))
        .context("failed to build HTTP client")?;
    let validator = ResourceValidator::new(locator, DefaultSchemaFetcher::new(http));

    let sources = if args.reads_stdin() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail!("Missing filename in argument");
        }
        vec![stdin_source(stdin.lock(), &args.filename)]
    } else {
        file_sources(&args.files)
    };

    let stdout = io::stdout();
    let summary = validate_sources(&validator, sources, &mut stdout.lock())
        .context("failed to write report")?;

    if let Some(errors) = &summary.errors {
        tracing::debug!("{errors}");
    }
    tracing::info!(
        results = summary.results,
        invalid = summary.invalid,
        failed_documents = summary.errors.as_ref().map_or(0, ValidationErrors::len),
        unreadable_files = summary.unreadable,
        "validation finished"
    );

    Ok(summary.exit_code())
}

/// Reads a stream line by line, ending every line with `\n`.
///
/// A trailing `\r` is dropped from each line, and the last line gains a
/// newline even if the stream lacked one. A closing `---` therefore always
/// forms a full separator.
pub fn stdin_source<R: BufRead>(reader: R, name: &str) -> Source {
    Source {
        name: name.to_string(),
        contents: frame_lines(reader),
    }
}

fn frame_lines<R: BufRead>(reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        buf.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(&line[..]));
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Reads each path in order. A read failure stays with its source.
pub fn file_sources(paths: &[PathBuf]) -> Vec<Source> {
    paths
        .iter()
        .map(|path| Source {
            name: path.display().to_string(),
            contents: std::fs::read(path),
        })
        .collect()
}

/// Validates each source in order, writing the report to `out`.
pub fn validate_sources<F, W>(
    validator: &ResourceValidator<F>,
    sources: Vec<Source>,
    out: &mut W,
) -> io::Result<RunSummary>
where
    F: SchemaFetcher,
    W: Write,
{
    let mut summary = RunSummary::default();

    for source in sources {
        let contents = match source.contents {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(file = %source.name, error = %e, "failed to open file");
                writeln!(out, "ERROR: Failed to open file {}: {e}", source.name)?;
                summary.unreadable += 1;
                continue;
            }
        };

        let outcome = validator.validate(&contents, &source.name);
        render(&outcome, out)?;

        summary.results += outcome.results.len();
        summary.invalid += outcome
            .results
            .iter()
            .filter(|r| r.status() == ResultStatus::Invalid)
            .count();
        ValidationErrors::accumulate(&mut summary.errors, outcome.errors);
    }

    Ok(summary)
}

/// Writes one report entry per document of `outcome`.
pub fn render<W: Write>(outcome: &FileValidation, out: &mut W) -> io::Result<()> {
    for (index, result) in outcome.results.iter().enumerate() {
        if let Some(failure) = outcome.error_for(index) {
            writeln!(out, "ERROR: {failure}")?;
            continue;
        }
        match result.status() {
            ResultStatus::Invalid => {
                writeln!(
                    out,
                    "The file {} contains an invalid {}",
                    result.file_name, result.kind
                )?;
                for violation in &result.errors {
                    writeln!(out, "--> {violation}")?;
                }
            }
            ResultStatus::Empty => writeln!(out, "The file {} is empty", result.file_name)?,
            ResultStatus::Valid => writeln!(
                out,
                "The file {} contains a valid {}",
                result.file_name, result.kind
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeschema_schema::StaticSchemaFetcher;
    use serde_json::json;

    const BASE: &str = "mem://schemas";

    fn validator() -> ResourceValidator<StaticSchemaFetcher> {
        let fetcher = StaticSchemaFetcher::new().with_schema(
            format!("{BASE}/master-standalone-strict/service-v1.json"),
            json!({
                "type": "object",
                "required": ["metadata"],
                "properties": {
                    "apiVersion": {"type": "string"},
                    "kind": {"type": "string"},
                    "metadata": {"type": "object"}
                },
                "additionalProperties": false
            }),
        );
        ResourceValidator::new(SchemaLocator::new("master", BASE), fetcher)
    }

    fn report(sources: Vec<Source>) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary = validate_sources(&validator(), sources, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    fn source(name: &str, body: &str) -> Source {
        Source {
            name: name.to_string(),
            contents: Ok(body.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_valid_and_empty_lines() {
        let (text, summary) = report(vec![source(
            "svc.yaml",
            "apiVersion: v1\nkind: Service\nmetadata: {}\n---\n",
        )]);
        assert_eq!(
            text,
            "The file svc.yaml contains a valid Service\nThe file svc.yaml is empty\n"
        );
        assert!(summary.is_success());
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.results, 2);
    }

    #[test]
    fn test_invalid_lists_violations() {
        let (text, summary) = report(vec![source("svc.yaml", "apiVersion: v1\nkind: Service\n")]);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("The file svc.yaml contains an invalid Service")
        );
        let violation = lines.next().unwrap();
        assert!(violation.starts_with("--> (root): "), "{violation}");
        assert!(violation.contains("metadata"));
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_failed_document_is_reported_in_place() {
        let (text, summary) = report(vec![source(
            "mixed.yaml",
            "apiVersion: v1\n---\napiVersion: v1\nkind: Service\nmetadata: {}\n",
        )]);
        assert_eq!(
            text,
            "ERROR: document 1: missing kind in mixed.yaml\n\
             The file mixed.yaml contains a valid Service\n"
        );
        assert_eq!(summary.errors.as_ref().map(ValidationErrors::len), Some(1));
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_unreadable_file_does_not_stop_run() {
        let (text, summary) = report(vec![
            Source {
                name: "missing.yaml".to_string(),
                contents: Err(io::Error::new(io::ErrorKind::NotFound, "not found")),
            },
            source("svc.yaml", "apiVersion: v1\nkind: Service\nmetadata: {}\n"),
        ]);
        assert!(text.starts_with("ERROR: Failed to open file missing.yaml"));
        assert!(text.ends_with("The file svc.yaml contains a valid Service\n"));
        assert_eq!(summary.unreadable, 1);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_errors_accumulate_across_files() {
        let (_, summary) = report(vec![
            source("a.yaml", "kind: Service\n"),
            source("b.yaml", "apiVersion: v1\n"),
        ]);
        let errors = summary.errors.unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.to_string().contains("a.yaml"));
        assert!(errors.to_string().contains("b.yaml"));
    }

    #[test]
    fn test_stdin_trailing_marker_becomes_separator() {
        let input = "apiVersion: v1\nkind: Service\nmetadata: {}\n---";
        let (text, summary) = report(vec![stdin_source(input.as_bytes(), "from stdin")]);
        assert_eq!(
            text,
            "The file from stdin contains a valid Service\nThe file from stdin is empty\n"
        );
        assert!(summary.is_success());
    }

    #[test]
    fn test_stdin_lines_are_newline_terminated() {
        let source = stdin_source("kind: A\r\n---\r\nkind: B".as_bytes(), "chart.yaml");
        assert_eq!(source.name, "chart.yaml");
        assert_eq!(source.contents.unwrap(), b"kind: A\n---\nkind: B\n");
    }

    #[test]
    fn test_stdin_empty_stream_stays_empty() {
        let source = stdin_source(io::empty(), STDIN_DISPLAY_NAME);
        assert!(source.contents.unwrap().is_empty());
    }

    #[test]
    fn test_empty_stream_reports_empty() {
        let (text, summary) = report(vec![source("from stdin", "")]);
        assert_eq!(text, "The file from stdin is empty\n");
        assert!(summary.is_success());
    }
}

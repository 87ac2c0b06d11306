//! # kubeschema CLI entry point
//!
//! Parses command-line arguments, initializes logging, and runs validation.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kubeschema_cli::validate::{run_validate, ValidateArgs};

/// Validate Kubernetes YAML manifests against versioned JSON schemas.
///
/// Every document of every file is checked against the standalone-strict
/// schema for its kind and apiVersion. Reads stdin when no file is given.
#[derive(Parser, Debug)]
#[command(name = "kubeschema", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (--verbose --verbose).
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "kubeschema starting");

    match run_validate(&cli.validate) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

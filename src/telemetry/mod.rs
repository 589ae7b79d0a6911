//! Logging setup for the copilot binary
//!
//! `tracing` events go to stderr so command output on stdout stays clean.
//! `RUST_LOG` overrides the verbosity chosen on the command line.

use crate::cli::Verbosity;
use crate::errors::{CopilotError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
        Verbosity::VeryVerbose => "trace",
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(verbosity: Verbosity, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| CopilotError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

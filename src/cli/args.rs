//! Command-line argument parsing for the CareBridge copilot
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CareBridge AI copilot backend
#[derive(Parser, Debug)]
#[command(name = "carebridge")]
#[command(version)]
#[command(about = "Patient-grounded AI health copilot with local/cloud model fallback", long_about = None)]
pub struct Args {
    /// Configuration file path (default: ~/.carebridge/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Explain a health alert in plain language
    Explain {
        /// Alert title
        #[arg(long)]
        title: String,

        /// Alert description
        #[arg(long)]
        description: String,

        /// Alert severity (info, warning, critical)
        #[arg(long, default_value = "info")]
        severity: String,
    },

    /// Run provider diagnostics and health checks
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_quiet() {
        let args = Args::try_parse_from(["carebridge", "-q", "doctor"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let args = Args::try_parse_from(["carebridge", "config"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Normal);
        assert_eq!(args.command, Commands::Config);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let args = Args::try_parse_from(["carebridge", "serve", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_serve_overrides() {
        let args = Args::try_parse_from(["carebridge", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        assert_eq!(
            args.command,
            Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
            }
        );
    }

    #[test]
    fn test_explain_defaults_severity() {
        let args = Args::try_parse_from([
            "carebridge",
            "explain",
            "--title",
            "High Heart Rate",
            "--description",
            "Resting rate above 100 bpm",
        ])
        .unwrap();
        match args.command {
            Commands::Explain { severity, .. } => assert_eq!(severity, "info"),
            other => panic!("Expected Explain, got {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["carebridge"]).is_err());
    }

    #[test]
    fn test_verbosity_as_str() {
        assert_eq!(Verbosity::Quiet.as_str(), "quiet");
        assert_eq!(Verbosity::VeryVerbose.as_str(), "very_verbose");
    }
}

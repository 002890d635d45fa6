// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_config_path;

/// Command-line arguments for `benchmatrix`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "benchmatrix",
    version,
    about = "Run a solver over every (instance, algorithm variant) pair and collect costs into a CSV file.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Benchmatrix.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Result file; overrides `[session].output`.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip instances that already have a row in the result file.
    #[arg(long)]
    pub resume: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BENCHMATRIX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the task matrix, but don't run the solver.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["benchmatrix"]).unwrap();
        assert_eq!(args.config, PathBuf::from("Benchmatrix.toml"));
        assert!(args.output.is_none());
        assert!(!args.resume && !args.dry_run);
    }

    #[test]
    fn flags_parse() {
        let args = CliArgs::try_parse_from([
            "benchmatrix",
            "--config",
            "bench/heuristic.toml",
            "--output",
            "out.csv",
            "--resume",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("bench/heuristic.toml"));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert!(args.resume);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}

// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskseq`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskseq",
    version,
    about = "Run a list of steps strictly in order, stopping at the first failure.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the step file (TOML).
    ///
    /// Default: `Taskseq.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Taskseq.toml")]
    pub config: String,

    /// Override `[config].queue_length` (how many steps may be queued ahead
    /// of the one running).
    #[arg(long, value_name = "N")]
    pub queue_length: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKSEQ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the steps, but don't run anything.
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

// src/errors.rs

//! Crate-wide error types and the `Result` alias.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskseqError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// A step that failed while running on the task runner.
#[derive(Error, Debug)]
#[error("step '{step}' failed")]
pub struct StepError {
    pub step: String,
    #[source]
    pub source: ActionError,
}

impl StepError {
    pub fn new(step: impl Into<String>, source: ActionError) -> Self {
        Self {
            step: step.into(),
            source,
        }
    }
}

/// Failure of a single step action, independent of the step it belongs to.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("failed to start `{cmd}`")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully; `output` is its combined
    /// stdout and stderr.
    #[error("`{cmd}` exited with {status}: {}", .output.trim_end())]
    Failed {
        cmd: String,
        status: ExitStatus,
        output: String,
    },

    #[error("failed to copy {} to {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TaskseqError>;

// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::runner::DEFAULT_QUEUE_CAPACITY;

/// Step file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// queue_length = 10
///
/// [[step]]
/// name = "build"
/// kind = "command"
/// cmd = "make"
/// args = ["all"]
///
/// [[step]]
/// name = "copy settings"
/// kind = "copy"
/// from = "settings.json"
/// to = "snapshot/settings.json"
/// missing_ok = true
/// mode = 0o600
///
/// [[step]]
/// name = "mark complete"
/// kind = "write"
/// path = "snapshot/complete.txt"
/// contents = "done"
/// ```
///
/// Steps keep the order they appear in the file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[step]]` tables, in file order.
    #[serde(default)]
    pub step: Vec<RawStep>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Capacity of the runner's queue. Must be at least 1.
    #[serde(default = "default_queue_length")]
    pub queue_length: usize,
}

fn default_queue_length() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            queue_length: default_queue_length(),
        }
    }
}

/// What a step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Command,
    Copy,
    Write,
}

/// One `[[step]]` table.
///
/// Every kind-specific field is optional here; [`validate`](super::validate)
/// checks that exactly the fields of `kind` are present.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    pub name: String,
    pub kind: StepKind,

    // command
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,

    // copy
    #[serde(default)]
    pub from: Option<PathBuf>,
    #[serde(default)]
    pub to: Option<PathBuf>,
    #[serde(default)]
    pub missing_ok: bool,
    /// Permission bits applied to the copy (e.g. `0o600`); by default the
    /// source's permissions are kept.
    #[serde(default)]
    pub mode: Option<u32>,

    // write
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub contents: Option<String>,
}

impl RawStep {
    /// A step of the given kind with no kind-specific fields set.
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cmd: None,
            args: Vec::new(),
            dir: None,
            from: None,
            to: None,
            missing_ok: false,
            mode: None,
            path: None,
            contents: None,
        }
    }
}

/// Validated step file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub steps: Vec<Step>,
}

impl ConfigFile {
    /// Construct without validation. Prefer `ConfigFile::try_from(raw)`.
    pub(crate) fn new_unchecked(config: ConfigSection, steps: Vec<Step>) -> Self {
        Self { config, steps }
    }
}

/// A validated step, ready to be queued on the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub action: StepAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run `cmd` with `args`, optionally inside `dir`.
    Command {
        cmd: String,
        args: Vec<String>,
        dir: Option<PathBuf>,
    },
    /// Copy `from` to `to`. With `missing_ok`, a missing source is not an
    /// error and any stale `to` is removed. `mode` sets the permissions of
    /// the copy.
    Copy {
        from: PathBuf,
        to: PathBuf,
        missing_ok: bool,
        mode: Option<u32>,
    },
    /// Write `contents` to `path`.
    Write { path: PathBuf, contents: String },
}

impl StepAction {
    pub fn kind(&self) -> StepKind {
        match self {
            StepAction::Command { .. } => StepKind::Command,
            StepAction::Copy { .. } => StepKind::Copy,
            StepAction::Write { .. } => StepKind::Write,
        }
    }
}

// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile, RawStep, Step, StepAction, StepKind};
use crate::errors::{Result, TaskseqError};

/// Highest value accepted for a copy step's `mode` (permission and
/// set-id/sticky bits).
const MAX_MODE: u32 = 0o7777;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskseqError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_steps(&raw)?;
        validate_global_config(&raw)?;
        validate_step_names(&raw)?;

        let steps = raw
            .step
            .into_iter()
            .map(step_from_raw)
            .collect::<Result<Vec<_>>>()?;

        Ok(ConfigFile::new_unchecked(raw.config, steps))
    }
}

fn ensure_has_steps(cfg: &RawConfigFile) -> Result<()> {
    if cfg.step.is_empty() {
        return Err(config_error("step file must contain at least one [[step]] table"));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.queue_length == 0 {
        return Err(config_error("[config].queue_length must be >= 1 (got 0)"));
    }
    Ok(())
}

fn validate_step_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, step) in cfg.step.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(config_error(format!("step #{} has an empty `name`", index + 1)));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(config_error(format!("step name '{}' is used more than once", step.name)));
        }
    }
    Ok(())
}

/// Convert one raw step, rejecting missing fields for its kind and fields
/// that belong to another kind.
fn step_from_raw(raw: RawStep) -> Result<Step> {
    reject_foreign_fields(&raw)?;

    let action = match raw.kind {
        StepKind::Command => {
            let cmd = required(&raw, raw.cmd.clone(), "cmd")?;
            if cmd.trim().is_empty() {
                return Err(config_error(format!("step '{}' has an empty `cmd`", raw.name)));
            }
            StepAction::Command {
                cmd,
                args: raw.args.clone(),
                dir: raw.dir.clone(),
            }
        }
        StepKind::Copy => {
            if let Some(mode) = raw.mode
                && mode > MAX_MODE
            {
                return Err(config_error(format!(
                    "step '{}' has `mode` {:#o}, which is above {:#o}",
                    raw.name, mode, MAX_MODE
                )));
            }
            StepAction::Copy {
                from: required(&raw, raw.from.clone(), "from")?,
                to: required(&raw, raw.to.clone(), "to")?,
                missing_ok: raw.missing_ok,
                mode: raw.mode,
            }
        }
        StepKind::Write => StepAction::Write {
            path: required(&raw, raw.path.clone(), "path")?,
            contents: raw.contents.clone().unwrap_or_default(),
        },
    };

    Ok(Step {
        name: raw.name,
        action,
    })
}

fn required<T>(raw: &RawStep, value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        config_error(format!(
            "step '{}' of kind {:?} is missing `{}`",
            raw.name, raw.kind, field
        ))
    })
}

fn reject_foreign_fields(raw: &RawStep) -> Result<()> {
    let present = [
        ("cmd", StepKind::Command, raw.cmd.is_some()),
        ("args", StepKind::Command, !raw.args.is_empty()),
        ("dir", StepKind::Command, raw.dir.is_some()),
        ("from", StepKind::Copy, raw.from.is_some()),
        ("to", StepKind::Copy, raw.to.is_some()),
        ("missing_ok", StepKind::Copy, raw.missing_ok),
        ("mode", StepKind::Copy, raw.mode.is_some()),
        ("path", StepKind::Write, raw.path.is_some()),
        ("contents", StepKind::Write, raw.contents.is_some()),
    ];

    for (field, owner, is_set) in present {
        if is_set && owner != raw.kind {
            return Err(config_error(format!(
                "step '{}' of kind {:?} does not accept `{}`",
                raw.name, raw.kind, field
            )));
        }
    }
    Ok(())
}

fn config_error(msg: impl Into<String>) -> TaskseqError {
    TaskseqError::ConfigError(msg.into())
}

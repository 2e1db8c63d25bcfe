// src/exec/step.rs

use tracing::{debug, info};

use crate::config::{Step, StepAction};
use crate::errors::StepError;
use crate::exec::command::execute;
use crate::exec::files::{copy_file, write_file};

/// Run one step to completion.
///
/// This is the task body queued on the runner for every step, so its error
/// is what `TaskRunner::wait` surfaces when the sequence stops.
pub async fn run_step(step: Step) -> Result<(), StepError> {
    let Step { name, action } = step;
    info!(step = %name, kind = ?action.kind(), "starting step");

    let result = match &action {
        StepAction::Command { cmd, args, dir } => {
            execute(cmd, args, dir.as_deref()).await.map(|output| {
                for line in output.lines() {
                    debug!(step = %name, "output: {}", line);
                }
            })
        }
        StepAction::Copy {
            from,
            to,
            missing_ok,
            mode,
        } => copy_file(from, to, *missing_ok, *mode).await.map(|copied| {
            if !copied {
                info!(step = %name, from = %from.display(), "source missing; nothing copied");
            }
        }),
        StepAction::Write { path, contents } => write_file(path, contents).await,
    };

    match result {
        Ok(()) => {
            info!(step = %name, "step finished");
            Ok(())
        }
        Err(source) => Err(StepError::new(name, source)),
    }
}

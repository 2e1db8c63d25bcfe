// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod runner;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, Step, StepAction, load_and_validate};
use crate::errors::{StepError, TaskseqError};
use crate::runner::{RunnerError, TaskRunner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - step file loading
/// - the task runner
/// - Ctrl-C handling (cancels before the next step starts)
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_and_validate(&config_path)?;

    if let Some(queue_length) = args.queue_length {
        if queue_length == 0 {
            return Err(TaskseqError::ConfigError(
                "--queue-length must be >= 1 (got 0)".to_string(),
            )
            .into());
        }
        cfg.config.queue_length = queue_length;
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let token = CancellationToken::new();

    // Ctrl-C → stop before the next step. The running step is left to finish.
    {
        let token = token.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            warn!("Ctrl+C received; stopping after the current step");
            token.cancel();
        });
    }

    let step_count = cfg.steps.len();
    info!(steps = step_count, queue_length = cfg.config.queue_length, "running steps");

    let outcome = match run_steps(cfg.steps, cfg.config.queue_length, token).await {
        Ok(()) => Ok(()),
        // Unwrap the step error so its cause chain stays visible.
        Err(RunnerError::Task(err)) => Err(anyhow::Error::new(err)),
        Err(other) => Err(anyhow::Error::new(other)),
    };
    outcome.with_context(|| {
        format!(
            "step sequence from {} did not complete",
            config_path.display()
        )
    })?;

    info!(steps = step_count, "all steps completed");
    Ok(())
}

/// Queue `steps` on a fresh [`TaskRunner`] in order and wait for the outcome.
///
/// Stops at the first failing step (its [`StepError`] is returned inside
/// [`RunnerError::Task`]) or, once `token` is cancelled, before the next step
/// starts.
pub async fn run_steps(
    steps: Vec<Step>,
    queue_length: usize,
    token: CancellationToken,
) -> std::result::Result<(), RunnerError<StepError>> {
    let runner = TaskRunner::with_capacity(token, queue_length);

    for step in steps {
        debug!(step = %step.name, "queueing step");
        runner.add(move || exec::run_step(step)).await?;
    }

    runner.wait().await
}

/// Simple dry-run output: print steps in execution order.
fn print_dry_run(cfg: &ConfigFile) {
    println!("taskseq dry-run");
    println!("  config.queue_length = {}", cfg.config.queue_length);
    println!();

    println!("steps ({}):", cfg.steps.len());
    for (index, step) in cfg.steps.iter().enumerate() {
        println!("  {}. {}", index + 1, step.name);
        match &step.action {
            StepAction::Command { cmd, args, dir } => {
                println!("      cmd: {cmd}");
                if !args.is_empty() {
                    println!("      args: {:?}", args);
                }
                if let Some(dir) = dir {
                    println!("      dir: {}", dir.display());
                }
            }
            StepAction::Copy {
                from,
                to,
                missing_ok,
                mode,
            } => {
                println!("      copy: {} -> {}", from.display(), to.display());
                if *missing_ok {
                    println!("      missing_ok: true");
                }
                if let Some(mode) = mode {
                    println!("      mode: {mode:#o}");
                }
            }
            StepAction::Write { path, contents } => {
                println!("      write: {} ({} bytes)", path.display(), contents.len());
            }
        }
    }

    debug!("dry-run complete (no execution)");
}

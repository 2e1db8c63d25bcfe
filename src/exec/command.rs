// src/exec/command.rs

//! Process execution with combined output.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ActionError;

/// Run `cmd` with `args` to completion and return its combined output.
///
/// The two streams are captured separately, so the result is all of stdout
/// followed by all of stderr rather than the lines interleaved in the order
/// the process wrote them.
///
/// A non-zero exit is reported as [`ActionError::Failed`], which carries the
/// exit status and the same combined output. The child is killed if the
/// returned future is dropped before it exits.
pub async fn execute(
    cmd: &str,
    args: &[String],
    dir: Option<&Path>,
) -> Result<String, ActionError> {
    let mut command = Command::new(cmd);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    debug!(cmd, ?args, ?dir, "spawning process");

    let output = command.output().await.map_err(|source| ActionError::Spawn {
        cmd: cmd.to_string(),
        source,
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    debug!(
        cmd,
        exit_code = output.status.code().unwrap_or(-1),
        success = output.status.success(),
        "process exited"
    );

    if !output.status.success() {
        return Err(ActionError::Failed {
            cmd: cmd.to_string(),
            status: output.status,
            output: combined,
        });
    }

    Ok(combined)
}

// src/runner/worker.rs

//! The runner's single background worker.

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::RunnerError;
use super::task::Task;

/// What the worker reports through the one-shot channel.
pub(crate) type Outcome<E> = Result<(), RunnerError<E>>;

/// Spawn the worker loop onto the current Tokio runtime.
///
/// The worker owns the receiving end of the queue. It stops when:
/// - the queue is closed and empty (`Ok(())`),
/// - the token is cancelled when the next task is dequeued (`Cancelled`),
/// - a task fails (`Task(err)`),
/// - the runner was dropped and `abandoned` fired (no report).
pub(crate) fn spawn_worker<E: Send + 'static>(
    queue: mpsc::Receiver<Task<E>>,
    outcome: oneshot::Sender<Outcome<E>>,
    token: CancellationToken,
    abandoned: CancellationToken,
) {
    tokio::spawn(async move {
        debug!("task runner worker started");
        run_worker(queue, outcome, token, abandoned).await;
    });
}

async fn run_worker<E>(
    mut queue: mpsc::Receiver<Task<E>>,
    outcome_tx: oneshot::Sender<Outcome<E>>,
    token: CancellationToken,
    abandoned: CancellationToken,
) {
    let mut executed: usize = 0;

    let outcome = loop {
        let Some(task) = queue.recv().await else {
            info!(executed, "task queue drained; all tasks completed");
            break Ok(());
        };

        // Checked between tasks only; a running task is never interrupted.
        if token.is_cancelled() {
            let discarded = 1 + discard_remaining(&mut queue);
            warn!(executed, discarded, "cancellation observed; stopping task runner");
            break Err(RunnerError::Cancelled);
        }

        if abandoned.is_cancelled() {
            let discarded = 1 + discard_remaining(&mut queue);
            debug!(executed, discarded, "task runner dropped; stopping");
            return;
        }

        let index = executed;
        executed += 1;
        debug!(task = index, kind = task.kind(), "running task");

        if let Err(err) = task.into_future().await {
            let discarded = discard_remaining(&mut queue);
            info!(task = index, discarded, "task failed; stopping task runner");
            break Err(RunnerError::Task(err));
        }
    };

    if outcome_tx.send(outcome).is_err() {
        debug!("runner outcome receiver dropped before the worker finished");
    }
}

/// Close the queue and drop every task still in it, returning how many.
///
/// Producers suspended on a full queue are released; their tasks are
/// discarded as well.
fn discard_remaining<E>(queue: &mut mpsc::Receiver<Task<E>>) -> usize {
    queue.close();
    let mut discarded = 0;
    while queue.try_recv().is_ok() {
        discarded += 1;
    }
    discarded
}

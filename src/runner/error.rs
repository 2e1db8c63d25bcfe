// src/runner/error.rs

use thiserror::Error;

/// Terminal outcome of a [`TaskRunner`](super::TaskRunner) other than success.
///
/// `E` is the task error type. A failing task's error is carried as-is in
/// [`RunnerError::Task`]; it is never wrapped or retried.
#[derive(Error, Debug)]
pub enum RunnerError<E> {
    /// A task returned an error; no later task was started.
    #[error("{0}")]
    Task(E),

    /// Cancellation was observed before the next task could start.
    #[error("task runner cancelled")]
    Cancelled,

    /// `wait` has already been called on this runner.
    #[error("task runner already finalized")]
    Finalized,

    /// The worker stopped without reporting an outcome (a task panicked).
    #[error("task runner worker stopped without reporting an outcome")]
    Aborted,
}

impl<E> RunnerError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunnerError::Cancelled)
    }

    /// Borrow the failing task's error, if this outcome came from a task.
    pub fn task_error(&self) -> Option<&E> {
        match self {
            RunnerError::Task(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_task_error(self) -> Option<E> {
        match self {
            RunnerError::Task(err) => Some(err),
            _ => None,
        }
    }
}

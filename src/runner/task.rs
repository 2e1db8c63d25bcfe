// src/runner/task.rs

//! Type-erased unit of work held in the runner's queue.

use std::future::Future;
use std::pin::Pin;

pub(crate) type TaskFuture<E> = Pin<Box<dyn Future<Output = Result<(), E>> + Send>>;

/// A zero-argument operation yielding `Ok(())` or the task error `E`.
///
/// Nothing runs until the worker calls [`Task::into_future`] and polls the
/// result, so a task dropped from the queue has no side effects.
pub(crate) struct Task<E> {
    kind: &'static str,
    run: Box<dyn FnOnce() -> TaskFuture<E> + Send>,
}

impl<E: Send + 'static> Task<E> {
    pub(crate) fn from_async<F, Fut>(task: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        Self {
            kind: "async",
            run: Box::new(move || -> TaskFuture<E> { Box::pin(task()) }),
        }
    }

    pub(crate) fn from_blocking<F>(task: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
    {
        Self {
            kind: "blocking",
            run: Box::new(move || -> TaskFuture<E> {
                Box::pin(async move {
                    match tokio::task::spawn_blocking(task).await {
                        Ok(result) => result,
                        // Re-raise on the worker; the runner then reports `Aborted`.
                        Err(err) => std::panic::resume_unwind(err.into_panic()),
                    }
                })
            }),
        }
    }
}

impl<E> Task<E> {
    pub(crate) fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn into_future(self) -> TaskFuture<E> {
        (self.run)()
    }
}

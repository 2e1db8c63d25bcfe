// src/runner/mod.rs

//! Ordered task runner.
//!
//! A [`TaskRunner`] executes fallible tasks one at a time, in the order they
//! were added, on a single background worker:
//! - the first failing task stops the runner and its error is handed back by
//!   [`TaskRunner::wait`] unchanged;
//! - a cancelled token stops the runner before the next task starts (a task
//!   that is already running always finishes);
//! - tasks still queued when the runner stops are dropped without running.
//!
//! The work queue is bounded, so [`TaskRunner::add`] suspends producers once
//! it is full and resumes them as the worker takes tasks off the queue.

pub mod error;
mod task;
mod worker;

pub use error::RunnerError;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use task::Task;
use worker::Outcome;

/// Number of tasks that may sit in the queue before `add` waits for room.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Runs tasks sequentially, in submission order, until the queue is drained,
/// a task fails, or the cancellation token fires.
///
/// `E` is the error type returned by tasks. The runner is `Sync`, so several
/// producers can share one instance by reference or through an `Arc`.
///
/// ```no_run
/// # async fn demo() {
/// use taskseq::runner::TaskRunner;
/// use tokio_util::sync::CancellationToken;
///
/// let runner = TaskRunner::<String>::new(CancellationToken::new());
/// runner.add(|| async { Ok(()) }).await.unwrap();
/// runner.add(|| async { Err("boom".to_string()) }).await.unwrap();
/// let outcome = runner.wait().await;
/// assert!(outcome.is_err());
/// # }
/// ```
pub struct TaskRunner<E> {
    /// Producer side of the work queue; `None` once `wait` has closed it.
    queue: Mutex<Option<mpsc::Sender<Task<E>>>>,
    /// One-shot outcome from the worker; `None` once a `wait` has observed it.
    ///
    /// The receiver stays in the slot while `wait` is pending, so a `wait`
    /// future that is dropped early leaves it for the next call.
    outcome: AsyncMutex<Option<oneshot::Receiver<Outcome<E>>>>,
    /// Cancelled when the runner is dropped; the worker then starts no
    /// further task.
    abandoned: CancellationToken,
    capacity: usize,
}

impl<E: Send + 'static> TaskRunner<E> {
    /// Create a runner with [`DEFAULT_QUEUE_CAPACITY`] and start its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(token: CancellationToken) -> Self {
        Self::with_capacity(token, DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a runner whose queue holds at most `capacity` pending tasks.
    ///
    /// `capacity` is clamped to at least 1.
    pub fn with_capacity(token: CancellationToken, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (queue_tx, queue_rx) = mpsc::channel(capacity);
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let abandoned = CancellationToken::new();

        worker::spawn_worker(queue_rx, outcome_tx, token, abandoned.clone());

        Self {
            queue: Mutex::new(Some(queue_tx)),
            outcome: AsyncMutex::new(Some(outcome_rx)),
            abandoned,
            capacity,
        }
    }

    /// Maximum number of tasks that can be queued without blocking `add`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queue an async task.
    ///
    /// Suspends while the queue is full. If the runner has already stopped
    /// (a task failed or cancellation was observed) the task is dropped and
    /// this still returns `Ok(())`.
    ///
    /// Returns [`RunnerError::Finalized`] if [`wait`](Self::wait) has already
    /// been called.
    pub async fn add<F, Fut>(&self, task: F) -> Result<(), RunnerError<E>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        self.enqueue(Task::from_async(task)).await
    }

    /// Queue a synchronous task.
    ///
    /// The closure runs on Tokio's blocking pool, but still occupies the
    /// runner's single execution slot: no other task starts until it returns.
    pub async fn add_blocking<F>(&self, task: F) -> Result<(), RunnerError<E>>
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
    {
        self.enqueue(Task::from_blocking(task)).await
    }

    /// Close the queue and wait for the runner's outcome.
    ///
    /// Resolves once every queued task has run, or as soon as the worker
    /// stops early. Only the first call to resolve observes the outcome;
    /// later calls return [`RunnerError::Finalized`].
    ///
    /// Dropping the returned future before it resolves does not stop the
    /// runner: the queue stays closed, queued tasks keep running, and the
    /// next `wait` picks up the outcome.
    pub async fn wait(&self) -> Result<(), RunnerError<E>> {
        let mut slot = self.outcome.lock().await;
        let receiver = slot.as_mut().ok_or(RunnerError::Finalized)?;

        // Dropping our sender closes the queue once in-flight `add` calls
        // release their clones; the worker then drains what is left.
        drop(lock(&self.queue).take());

        let received = receiver.await;
        slot.take();

        match received {
            Ok(outcome) => outcome,
            Err(_) => Err(RunnerError::Aborted),
        }
    }

    async fn enqueue(&self, task: Task<E>) -> Result<(), RunnerError<E>> {
        // Clone the sender so the lock is not held while waiting for room.
        let sender = lock(&self.queue).clone().ok_or(RunnerError::Finalized)?;

        if sender.send(task).await.is_err() {
            debug!("task runner already stopped; discarding task");
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E> Drop for TaskRunner<E> {
    fn drop(&mut self) {
        self.abandoned.cancel();
    }
}

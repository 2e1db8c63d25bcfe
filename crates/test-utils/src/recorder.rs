use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

/// Shared, append-only log of what tasks did.
///
/// Clone it into each task closure and call [`Recorder::push`]; read the
/// result with [`Recorder::snapshot`] once the runner is done.
pub struct Recorder<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Recorder<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, value: T) {
        self.entries.lock().unwrap().push(value);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Recorder<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.lock().unwrap().clone()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets a test hold a task in the middle of its execution.
///
/// The task calls [`Gate::pass`], which signals "started" and then waits
/// until the test calls [`Gate::release`]. Both sides use `Notify` permits,
/// so the order in which they arrive does not matter.
#[derive(Clone, Default)]
pub struct Gate {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called from inside a task.
    pub async fn pass(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }

    /// Wait until a task has reached [`Gate::pass`].
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the task blocked in [`Gate::pass`] continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

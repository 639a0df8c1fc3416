//! Handles to submitted work.

use crossbeam::channel::{Receiver, TryRecvError};
use gridpath_common::utils::error::ExecutorError;

/// Type-erased unit of work queued on the general pool.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Result of a general-pool task.
///
/// If the task is discarded without running (see
/// [`DualPoolExecutor::shutdown_now`](super::DualPoolExecutor::shutdown_now)),
/// joining yields [`ExecutorError::Cancelled`].
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: Receiver<Result<T, ExecutorError>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(rx: Receiver<Result<T, ExecutorError>>) -> Self {
        Self { rx }
    }

    /// Blocks until the task finishes.
    pub fn join(self) -> Result<T, ExecutorError> {
        match self.rx.recv() {
            Ok(result) => result,
            Err(_) => Err(ExecutorError::Cancelled),
        }
    }

    /// Returns the result if the task already finished.
    pub fn try_join(&self) -> Option<Result<T, ExecutorError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ExecutorError::Cancelled)),
        }
    }
}

/// A submitted task that never started, handed back by `shutdown_now`.
///
/// Running it executes the task on the calling thread and completes its
/// handle. Dropping it completes the handle with `Cancelled`.
pub struct PendingTask {
    job: Job,
}

impl PendingTask {
    pub(crate) fn new(job: Job) -> Self {
        Self { job }
    }

    /// Runs the task on the current thread.
    pub fn run(self) {
        (self.job)();
    }
}

impl std::fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTask").finish_non_exhaustive()
    }
}

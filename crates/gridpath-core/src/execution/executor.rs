//! The dual-pool executor.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use crossbeam::deque::{Injector, Steal};
use gridpath_common::utils::error::{Error, ExecutorError, Result};
use parking_lot::{Condvar, Mutex};

use super::handle::Job;
use super::{CancelFlag, ExecutorConfig, ForkJoinContext, PendingTask, RecursiveTask, TaskHandle};

static GLOBAL: OnceLock<DualPoolExecutor> = OnceLock::new();

/// Counters describing executor activity since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    /// Tasks accepted by `submit` or `invoke`.
    pub submitted: u64,
    /// Tasks that ran to completion, including ones that panicked.
    pub completed: u64,
    /// Tasks whose panic was caught at the task boundary.
    pub panicked: u64,
    /// Submissions refused after shutdown.
    pub rejected: u64,
}

/// State shared between the executor and its queued jobs.
struct Shared {
    /// Submitted general-pool jobs that have not started.
    queue: Injector<Job>,
    /// Jobs accepted and not yet finished or handed back.
    active: Mutex<usize>,
    /// Signalled when `active` drops to zero.
    idle: Condvar,
    accepting: AtomicBool,
    cancel: CancelFlag,
    submitted: AtomicU64,
    completed: AtomicU64,
    panicked: AtomicU64,
    rejected: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        Self {
            queue: Injector::new(),
            active: Mutex::new(0),
            idle: Condvar::new(),
            accepting: AtomicBool::new(true),
            cancel: CancelFlag::new(),
            submitted: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    fn admit(&self) -> std::result::Result<(), ExecutorError> {
        if !self.accepting.load(Ordering::Acquire) {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Rejected submission: executor is shut down");
            return Err(ExecutorError::Shutdown);
        }
        *self.active.lock() += 1;
        self.submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finish(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut active = self.active.lock();
        *active = active.saturating_sub(n);
        if *active == 0 {
            self.idle.notify_all();
        }
    }

    fn steal(&self) -> Option<Job> {
        std::iter::repeat_with(|| self.queue.steal())
            .find(|s| !s.is_retry())
            .and_then(Steal::success)
    }

    /// Runs one queued job on the calling worker. Cancelled jobs are dropped,
    /// which completes their handles with `Cancelled`.
    fn run_next(&self) {
        let Some(job) = self.steal() else {
            return;
        };
        if !self.cancel.is_cancelled() {
            job();
        }
        self.finish(1);
    }

    fn record_panic(&self, payload: &(dyn Any + Send)) -> ExecutorError {
        let message = panic_message(payload);
        self.panicked.fetch_add(1, Ordering::Relaxed);
        tracing::error!("Task panicked: {}", message);
        ExecutorError::TaskPanicked(message)
    }
}

/// Decrements the active count when an `invoke` call returns or unwinds.
struct ActiveGuard<'a>(&'a Shared);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.completed.fetch_add(1, Ordering::Relaxed);
        self.0.finish(1);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Executor with a general task pool and a work-stealing recursive pool.
///
/// - [`submit`](Self::submit) queues an independent task on the general pool.
/// - [`invoke`](Self::invoke) runs a fork-join [`RecursiveTask`] on the
///   recursive pool and blocks until the whole job finishes.
/// - [`shutdown`](Self::shutdown) stops intake and lets running work finish.
/// - [`shutdown_now`](Self::shutdown_now) also raises the cancel flag and
///   returns queued work that never started.
pub struct DualPoolExecutor {
    config: ExecutorConfig,
    general: rayon::ThreadPool,
    recursive: rayon::ThreadPool,
    shared: Arc<Shared>,
}

impl DualPoolExecutor {
    /// Creates an executor with its own pools.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the operating system refuses to spawn
    /// the worker threads.
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        let general_threads = config.general_threads();
        let recursive_threads = config.recursive_pool_threads();

        let general = rayon::ThreadPoolBuilder::new()
            .num_threads(general_threads)
            .thread_name(|i| format!("gridpath-general-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build general pool: {e}")))?;

        let recursive = rayon::ThreadPoolBuilder::new()
            .num_threads(recursive_threads)
            .stack_size(config.recursive_stack_size)
            .thread_name(|i| format!("gridpath-recursive-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build recursive pool: {e}")))?;

        tracing::debug!(
            general_threads,
            recursive_threads,
            "Created dual-pool executor"
        );

        Ok(Self {
            config,
            general,
            recursive,
            shared: Arc::new(Shared::new()),
        })
    }

    /// Creates an executor with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`DualPoolExecutor::new`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(ExecutorConfig::default())
    }

    /// The process-wide executor, created on first use.
    ///
    /// # Panics
    ///
    /// Panics if the worker threads cannot be spawned.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::with_defaults().expect("failed to build the global executor"))
    }

    /// The configuration this executor was built from.
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Number of general-pool workers.
    #[must_use]
    pub fn general_threads(&self) -> usize {
        self.general.current_num_threads()
    }

    /// Number of recursive-pool workers.
    #[must_use]
    pub fn recursive_threads(&self) -> usize {
        self.recursive.current_num_threads()
    }

    /// Queues `task` on the general pool.
    ///
    /// A panic inside the task is caught, logged, and reported through the
    /// handle as [`ExecutorError::TaskPanicked`].
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Shutdown`] after `shutdown` or `shutdown_now`.
    pub fn submit<F, T>(&self, task: F) -> std::result::Result<TaskHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.shared.admit()?;

        let (tx, rx) = crossbeam::channel::bounded(1);
        let shared = Arc::clone(&self.shared);
        let job: Job = Box::new(move || {
            let result = match panic::catch_unwind(AssertUnwindSafe(task)) {
                Ok(value) => Ok(value),
                Err(payload) => Err(shared.record_panic(payload.as_ref())),
            };
            shared.completed.fetch_add(1, Ordering::Relaxed);
            // The caller may have dropped the handle.
            let _ = tx.send(result);
        });
        self.shared.queue.push(job);

        let shared = Arc::clone(&self.shared);
        self.general.spawn(move || shared.run_next());
        Ok(TaskHandle::new(rx))
    }

    /// Runs `task` on the recursive pool, blocking until it and every child
    /// it forks have finished.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Shutdown`] after shutdown and
    /// [`ExecutorError::TaskPanicked`] if any task in the job panicked.
    pub fn invoke<T: RecursiveTask>(
        &self,
        task: T,
    ) -> std::result::Result<T::Output, ExecutorError> {
        self.shared.admit()?;
        let _guard = ActiveGuard(&self.shared);

        let ctx = self.fork_join_context();
        let outcome = self
            .recursive
            .install(|| panic::catch_unwind(AssertUnwindSafe(|| task.compute(&ctx))));
        outcome.map_err(|payload| self.shared.record_panic(payload.as_ref()))
    }

    /// A context bound to this executor's cancel flag.
    #[must_use]
    pub fn fork_join_context(&self) -> ForkJoinContext {
        ForkJoinContext::new(self.shared.cancel.clone())
    }

    /// A clone of the cancel flag, for loops running outside the pools.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.shared.cancel.clone()
    }

    /// Stops accepting work. Queued and running tasks still finish.
    pub fn shutdown(&self) {
        if self.shared.accepting.swap(false, Ordering::AcqRel) {
            tracing::info!("Executor shutting down");
        }
    }

    /// Stops accepting work, raises the cancel flag, and returns every queued
    /// task that had not started.
    pub fn shutdown_now(&self) -> Vec<PendingTask> {
        self.shared.accepting.store(false, Ordering::Release);
        self.shared.cancel.cancel();

        let mut pending = Vec::new();
        while let Some(job) = self.shared.steal() {
            pending.push(PendingTask::new(job));
        }
        self.shared.finish(pending.len());

        tracing::warn!(
            "Executor cancelled; {} queued tasks returned unstarted",
            pending.len()
        );
        pending
    }

    /// Returns true once `shutdown_now` was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Returns true once either shutdown method was called.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        !self.shared.accepting.load(Ordering::Acquire)
    }

    /// Blocks until no accepted work remains or `timeout` elapses.
    ///
    /// Returns true if the executor went idle.
    pub fn await_termination(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut active = self.shared.active.lock();
        while *active > 0 {
            if self.shared.idle.wait_until(&mut active, deadline).timed_out() {
                return *active == 0;
            }
        }
        true
    }

    /// Snapshot of the activity counters.
    #[must_use]
    pub fn stats(&self) -> ExecutorStats {
        ExecutorStats {
            submitted: self.shared.submitted.load(Ordering::Relaxed),
            completed: self.shared.completed.load(Ordering::Relaxed),
            panicked: self.shared.panicked.load(Ordering::Relaxed),
            rejected: self.shared.rejected.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for DualPoolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualPoolExecutor")
            .field("general_threads", &self.general_threads())
            .field("recursive_threads", &self.recursive_threads())
            .field("shutdown", &self.is_shutdown())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

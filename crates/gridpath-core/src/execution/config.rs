//! Executor configuration.

use std::num::NonZeroUsize;

/// Default multiplier applied to hardware parallelism for the general pool.
const DEFAULT_GENERAL_MULTIPLIER: usize = 4;

/// Default stack size for recursive-pool workers. Fork-join recursion nests
/// one frame group per fan-out level.
const DEFAULT_RECURSIVE_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for the [`DualPoolExecutor`](super::DualPoolExecutor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// General pool size as a multiple of available parallelism.
    pub general_multiplier: usize,
    /// Recursive pool size. `None` uses available parallelism.
    pub recursive_threads: Option<usize>,
    /// Stack size in bytes for recursive-pool workers.
    pub recursive_stack_size: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            general_multiplier: DEFAULT_GENERAL_MULTIPLIER,
            recursive_threads: None,
            recursive_stack_size: DEFAULT_RECURSIVE_STACK_SIZE,
        }
    }
}

impl ExecutorConfig {
    /// Sets the general pool multiplier.
    #[must_use]
    pub fn with_general_multiplier(mut self, multiplier: usize) -> Self {
        self.general_multiplier = multiplier;
        self
    }

    /// Sets an explicit recursive pool size.
    #[must_use]
    pub fn with_recursive_threads(mut self, threads: usize) -> Self {
        self.recursive_threads = Some(threads);
        self
    }

    /// Sets the recursive-pool stack size.
    #[must_use]
    pub fn with_recursive_stack_size(mut self, bytes: usize) -> Self {
        self.recursive_stack_size = bytes;
        self
    }

    /// Available hardware parallelism, at least 1.
    #[must_use]
    pub fn hardware_parallelism() -> usize {
        std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    /// Resolved general pool size.
    #[must_use]
    pub fn general_threads(&self) -> usize {
        (Self::hardware_parallelism() * self.general_multiplier).max(1)
    }

    /// Resolved recursive pool size.
    #[must_use]
    pub fn recursive_pool_threads(&self) -> usize {
        self.recursive_threads
            .unwrap_or_else(Self::hardware_parallelism)
            .max(1)
    }
}

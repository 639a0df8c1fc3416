//! Fork-join tasks for the recursive pool.

use rayon::prelude::*;

use super::CancelFlag;

/// A unit of work that may split into child tasks and wait for them.
///
/// Implementations should return early when
/// [`ForkJoinContext::is_cancelled`] reports true.
pub trait RecursiveTask: Send + Sized {
    /// Value produced by the task.
    type Output: Send;

    /// Runs the task. Children are forked through `ctx`.
    fn compute(self, ctx: &ForkJoinContext) -> Self::Output;
}

/// What a running [`RecursiveTask`] can do: fork children and poll for
/// cancellation.
#[derive(Debug, Clone)]
pub struct ForkJoinContext {
    cancel: CancelFlag,
}

impl ForkJoinContext {
    /// Creates a context observing `cancel`.
    #[must_use]
    pub fn new(cancel: CancelFlag) -> Self {
        Self { cancel }
    }

    /// Returns true once the owning executor was told to stop now.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs all `tasks` in parallel on the current pool and waits for every
    /// one of them. Outputs keep the input order.
    pub fn invoke_all<T: RecursiveTask>(&self, tasks: Vec<T>) -> Vec<T::Output> {
        match tasks.len() {
            0 => Vec::new(),
            1 => tasks.into_iter().map(|t| t.compute(self)).collect(),
            _ => tasks.into_par_iter().map(|t| t.compute(self)).collect(),
        }
    }

    /// Runs two tasks in parallel and waits for both.
    pub fn join<A: RecursiveTask, B: RecursiveTask>(&self, a: A, b: B) -> (A::Output, B::Output) {
        rayon::join(|| a.compute(self), || b.compute(self))
    }
}

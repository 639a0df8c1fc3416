//! Execution primitives.
//!
//! The [`DualPoolExecutor`] owns two worker pools:
//!
//! - a general pool for independent unit-of-work tasks, submitted with
//!   [`DualPoolExecutor::submit`] and awaited through a [`TaskHandle`];
//! - a work-stealing pool for self-similar fork-join work, entered with
//!   [`DualPoolExecutor::invoke`] and expressed as a [`RecursiveTask`].
//!
//! Both pools share one [`CancelFlag`]. Cancellation is cooperative: tasks
//! poll the flag at loop heads and recursive entries, nothing is interrupted.

mod cancel;
mod config;
mod executor;
mod handle;
mod recursive;

pub use cancel::CancelFlag;
pub use config::ExecutorConfig;
pub use executor::{DualPoolExecutor, ExecutorStats};
pub use handle::{PendingTask, TaskHandle};
pub use recursive::{ForkJoinContext, RecursiveTask};

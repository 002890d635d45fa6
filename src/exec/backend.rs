// src/exec/backend.rs

//! Pluggable solver backend abstraction.
//!
//! The driver talks to a `SolverBackend` instead of spawning processes
//! itself. This makes it easy to swap in a scripted solver in tests while
//! keeping the production implementation in [`task_runner`](super::task_runner).
//!
//! - `ProcessSolver` is the default implementation used by `benchmatrix`.
//!   It launches the solver binary once per task.
//! - Tests can provide their own `SolverBackend` that, for example, returns
//!   canned stdout per (instance, variant) pair.

use std::future::Future;
use std::pin::Pin;

use crate::matrix::Task;

/// Result of invoking the solver for one task, before its output is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The solver exited successfully; this is everything it wrote to stdout.
    Completed { stdout: String },
    /// The solver could not be launched, exited abnormally or overran its
    /// time budget.
    Failed { cause: String },
}

/// Trait abstracting how a task is executed.
///
/// Each call must attempt the task exactly once and must not return before
/// the run is over: the driver relies on this for its strictly sequential
/// order.
pub trait SolverBackend: Send {
    /// Run the solver for `task` and report what happened.
    fn invoke<'a>(
        &'a mut self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = Invocation> + Send + 'a>>;

    /// Command line used for `task`, for logs and dry runs.
    fn describe(&self, task: &Task) -> String;
}

// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the solver for each task,
//! using `tokio::process::Command`, and handing the captured output back to
//! the driver.
//!
//! - [`command`] builds the solver argument vector.
//! - [`task_runner`] runs a single solver process under a hard timeout.
//! - [`backend`] provides the `SolverBackend` trait that the driver uses, and
//!   which tests can replace with a scripted implementation.

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{Invocation, SolverBackend};
pub use command::{display_command, solver_args};
pub use task_runner::ProcessSolver;

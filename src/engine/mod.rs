// src/engine/mod.rs

//! Orchestration engine for benchmatrix.
//!
//! This module ties together:
//! - the task matrix (what to run, in which order)
//! - the solver backend (how one task is run)
//! - result extraction and failure classification
//! - the incremental result writer
//! - progress reporting and notifications
//!
//! The pure session state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::fmt;
use std::time::Duration;

use crate::exec::Invocation;
use crate::extract::{Cost, extract_cost};

/// Class of a failed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The solver could not be launched, exited abnormally or timed out.
    Invocation,
    /// The solver exited cleanly but its output held no cost.
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Invocation => "invocation_error",
            FailureKind::Parse => "parse_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success(Cost),
    Failure { kind: FailureKind, cause: String },
}

impl RunOutcome {
    /// Classify a finished invocation, parsing its stdout on success.
    pub fn from_invocation(invocation: Invocation) -> Self {
        match invocation {
            Invocation::Completed { stdout } => match extract_cost(&stdout) {
                Ok(cost) => RunOutcome::Success(cost),
                Err(err) => RunOutcome::Failure {
                    kind: FailureKind::Parse,
                    cause: err.to_string(),
                },
            },
            Invocation::Failed { cause } => RunOutcome::Failure {
                kind: FailureKind::Invocation,
                cause,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success(_))
    }

    /// Cell text for the result file.
    pub fn cell<'a>(&'a self, failure_marker: &'a str) -> &'a str {
        match self {
            RunOutcome::Success(cost) => cost.as_str(),
            RunOutcome::Failure { .. } => failure_marker,
        }
    }
}

/// Outcomes of every variant for one instance, in variant order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub instance_id: String,
    pub outcomes: Vec<RunOutcome>,
}

impl ResultRow {
    /// Only rows with at least one success are persisted.
    pub fn has_success(&self) -> bool {
        self.outcomes.iter().any(RunOutcome::is_success)
    }

    /// Full CSV record: instance id followed by one cell per variant.
    pub fn record(&self, failure_marker: &str) -> Vec<String> {
        std::iter::once(self.instance_id.clone())
            .chain(
                self.outcomes
                    .iter()
                    .map(|outcome| outcome.cell(failure_marker).to_string()),
            )
            .collect()
    }
}

/// Lifecycle of a session. There is no pause or cancel state: a session is
/// only stopped early by killing the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
}

/// Totals reported when a session completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub tasks_total: usize,
    /// Progress ticks at completion; skipped tasks count as completed.
    pub tasks_completed: usize,
    pub tasks_failed: usize,
    pub tasks_skipped: usize,
    pub rows_written: usize,
    pub rows_dropped: usize,
    pub elapsed: Duration,
}

pub mod core;
pub mod progress;
pub mod runtime;

pub use core::{InstanceStep, SessionCore};
pub use progress::Progress;
pub use runtime::Driver;

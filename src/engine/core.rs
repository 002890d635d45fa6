// src/engine/core.rs

//! Pure session state machine.
//!
//! `SessionCore` tracks where a session is (`Idle → Running → Completed`),
//! assembles the outcomes of one instance into a [`ResultRow`], counts
//! progress and failures, and decides which rows are persisted and when a
//! periodic report is due.
//!
//! The async/IO-heavy shell (`engine::runtime::Driver`) is responsible for:
//! - invoking the solver backend
//! - writing rows to the result file
//! - relaying events to the notifier
//!
//! The core has no Tokio types, performs no IO, and is unit tested on its own.

use std::time::Duration;

use tracing::warn;

use crate::engine::progress::Progress;
use crate::engine::{ResultRow, RunOutcome, SessionState, SessionSummary};

/// What to do once every variant of an instance has been attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStep {
    /// Row to append to the result file. `None` when every variant failed.
    pub row: Option<ResultRow>,
    /// Periodic report to emit, if one is due for this instance.
    pub report: Option<String>,
}

#[derive(Debug)]
struct PendingRow {
    index: usize,
    instance_id: String,
    outcomes: Vec<RunOutcome>,
}

/// Pure core session state.
#[derive(Debug)]
pub struct SessionCore {
    state: SessionState,
    variant_count: usize,
    progress: Progress,
    current: Option<PendingRow>,
    tasks_failed: usize,
    tasks_skipped: usize,
    rows_written: usize,
    rows_dropped: usize,
}

impl SessionCore {
    pub fn new(instance_count: usize, variant_count: usize, report_every: usize) -> Self {
        Self {
            state: SessionState::Idle,
            variant_count,
            progress: Progress::new(instance_count * variant_count, report_every),
            current: None,
            tasks_failed: 0,
            tasks_skipped: 0,
            rows_written: 0,
            rows_dropped: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// `Idle → Running`.
    pub fn start(&mut self) {
        debug_assert_eq!(self.state, SessionState::Idle);
        self.state = SessionState::Running;
    }

    /// Open a new row for instance `index`.
    pub fn begin_instance(&mut self, index: usize, instance_id: &str) {
        debug_assert_eq!(self.state, SessionState::Running);
        debug_assert!(self.current.is_none(), "previous instance was not finished");
        self.current = Some(PendingRow {
            index,
            instance_id: instance_id.to_string(),
            outcomes: Vec::with_capacity(self.variant_count),
        });
    }

    /// Add one task outcome to the open row and tick progress.
    ///
    /// Returns the number of tasks completed so far.
    pub fn record(&mut self, outcome: RunOutcome) -> usize {
        if !outcome.is_success() {
            self.tasks_failed += 1;
        }
        if let Some(row) = self.current.as_mut() {
            row.outcomes.push(outcome);
        }
        self.progress.tick()
    }

    /// Close the open row, deciding whether it is persisted.
    pub fn finish_instance(&mut self) -> InstanceStep {
        let Some(pending) = self.current.take() else {
            return InstanceStep {
                row: None,
                report: None,
            };
        };

        let report = self.progress.periodic_message(pending.index);
        let row = ResultRow {
            instance_id: pending.instance_id,
            outcomes: pending.outcomes,
        };

        if row.has_success() {
            self.rows_written += 1;
            InstanceStep {
                row: Some(row),
                report,
            }
        } else {
            self.rows_dropped += 1;
            warn!(instance = %row.instance_id, "every variant failed; row not written");
            InstanceStep { row: None, report }
        }
    }

    /// Account for an instance whose row already exists in the result file.
    pub fn skip_instance(&mut self) -> usize {
        self.tasks_skipped += self.variant_count;
        self.progress.advance(self.variant_count)
    }

    /// `Running → Completed`, returning the session totals.
    pub fn complete(&mut self, elapsed: Duration) -> SessionSummary {
        debug_assert!(self.current.is_none(), "instance left open at completion");
        self.state = SessionState::Completed;
        SessionSummary {
            tasks_total: self.progress.total(),
            tasks_completed: self.progress.completed(),
            tasks_failed: self.tasks_failed,
            tasks_skipped: self.tasks_skipped,
            rows_written: self.rows_written,
            rows_dropped: self.rows_dropped,
            elapsed,
        }
    }
}

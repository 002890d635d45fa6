// src/engine/runtime.rs

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::SolverBackend;
use crate::matrix::{MatrixRow, Task, TaskMatrix};
use crate::notify::{Level, Notifier};
use crate::output::ResultWriter;

use super::core::SessionCore;
use super::progress::summary_message;
use super::{RunOutcome, SessionState, SessionSummary};

/// Runs a session: every task of the matrix, one at a time, in matrix order.
///
/// This is the IO shell around `SessionCore`, which holds the session
/// semantics. The driver awaits the solver backend, appends finished rows
/// through the `ResultWriter` and relays events to the `Notifier`.
///
/// Per-task failures never stop the session. Only a failure to persist a row
/// is fatal.
pub struct Driver<S: SolverBackend> {
    matrix: TaskMatrix,
    core: SessionCore,
    solver: S,
    writer: ResultWriter,
    notifier: Box<dyn Notifier>,
    title: String,
    already_done: HashSet<String>,
}

impl<S: SolverBackend> fmt::Debug for Driver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("core", &self.core)
            .field("writer", &self.writer.path())
            .finish_non_exhaustive()
    }
}

impl<S: SolverBackend> Driver<S> {
    pub fn new(
        matrix: TaskMatrix,
        solver: S,
        writer: ResultWriter,
        notifier: Box<dyn Notifier>,
        report_every: usize,
    ) -> Self {
        let core = SessionCore::new(matrix.instance_count(), matrix.variant_count(), report_every);
        Self {
            matrix,
            core,
            solver,
            writer,
            notifier,
            title: "benchmark".to_string(),
            already_done: HashSet::new(),
        }
    }

    /// Label used in the start event.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Instances whose rows are already in the result file; they are skipped.
    pub fn skipping(mut self, instance_ids: HashSet<String>) -> Self {
        self.already_done = instance_ids;
        self
    }

    pub fn state(&self) -> SessionState {
        self.core.state()
    }

    /// Main loop.
    ///
    /// - For each instance, runs every variant and collects the outcomes.
    /// - Appends the row if at least one variant succeeded.
    /// - Emits the periodic report and, at the end, the elapsed-time summary.
    pub async fn run(&mut self) -> Result<SessionSummary> {
        let started = Instant::now();
        self.core.start();

        let start_message = format!(
            "Starting {}: {} instances x {} variants",
            self.title,
            self.matrix.instance_count(),
            self.matrix.variant_count()
        );
        self.notify(Level::Info, &start_message).await;

        for index in 0..self.matrix.rows().len() {
            let row = self.matrix.rows()[index].clone();
            self.run_instance(&row).await?;
        }

        let summary = self.core.complete(started.elapsed());
        info!(
            tasks_completed = summary.tasks_completed,
            rows_written = summary.rows_written,
            rows_dropped = summary.rows_dropped,
            tasks_failed = summary.tasks_failed,
            tasks_skipped = summary.tasks_skipped,
            "session completed"
        );
        self.notify(Level::Info, &summary_message(summary.elapsed)).await;

        Ok(summary)
    }

    async fn run_instance(&mut self, row: &MatrixRow) -> Result<()> {
        let instance_id = row.instance.id();

        if self.already_done.contains(instance_id) {
            let done = self.core.skip_instance();
            info!(
                instance = %instance_id,
                completed = done,
                total = self.core.progress().total(),
                "row already in result file; skipping instance"
            );
            return Ok(());
        }

        self.core.begin_instance(row.index, instance_id);

        for task in &row.tasks {
            let outcome = self.run_task(task).await;
            let done = self.core.record(outcome);
            debug!(completed = done, total = self.core.progress().total(), "progress");
        }

        let step = self.core.finish_instance();
        if let Some(result_row) = &step.row {
            self.writer.append(result_row)?;
        }
        if let Some(report) = step.report {
            self.notify(Level::Info, &report).await;
        }

        Ok(())
    }

    async fn run_task(&mut self, task: &Task) -> RunOutcome {
        let invocation = self.solver.invoke(task).await;
        let outcome = RunOutcome::from_invocation(invocation);

        match &outcome {
            RunOutcome::Success(cost) => {
                info!(
                    instance = %task.instance.id(),
                    variant = %task.variant.name,
                    cost = %cost,
                    "task succeeded"
                );
            }
            RunOutcome::Failure { kind, cause } => {
                let message = format!(
                    "{} / {} failed ({kind}): {cause}",
                    task.instance.id(),
                    task.variant.name
                );
                self.notify(Level::Error, &message).await;
            }
        }

        outcome
    }

    /// Best-effort delivery: a failing sink is logged and otherwise ignored.
    async fn notify(&self, level: Level, message: &str) {
        if let Err(err) = self.notifier.emit(level, message).await {
            warn!(error = %err, %level, "notification could not be delivered");
        }
    }
}

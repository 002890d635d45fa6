// src/engine/progress.rs

use std::time::Duration;

use tracing::debug;

/// Counts finished tasks and decides when a periodic report is due.
///
/// One tick per task, successful or not. Periodic reports are keyed on the
/// 0-based instance index, independently of the tick count.
#[derive(Debug, Clone)]
pub struct Progress {
    total: usize,
    completed: usize,
    report_every: usize,
}

impl Progress {
    /// `report_every` of 0 is treated as 1.
    pub fn new(total: usize, report_every: usize) -> Self {
        Self {
            total,
            completed: 0,
            report_every: report_every.max(1),
        }
    }

    /// Record one finished task and return the new completed count.
    pub fn tick(&mut self) -> usize {
        self.completed += 1;
        debug!(completed = self.completed, total = self.total, "task finished");
        self.completed
    }

    /// Record `n` tasks at once (instances skipped on resume).
    pub fn advance(&mut self, n: usize) -> usize {
        self.completed += n;
        self.completed
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Message for the periodic report after instance `index` finished, if
    /// one is due.
    pub fn periodic_message(&self, index: usize) -> Option<String> {
        (index % self.report_every == 0).then(|| format!("Done {index} documents"))
    }
}

/// Final elapsed-time event.
pub fn summary_message(elapsed: Duration) -> String {
    format!("Run completed in {:.2} seconds", elapsed.as_secs_f64())
}

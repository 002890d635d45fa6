// src/exec/task_runner.rs

//! Solver process runner.

use std::future::Future;
use std::pin::Pin;
use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::process::Command;
use tracing::{debug, info};

use crate::exec::backend::{Invocation, SolverBackend};
use crate::exec::command::{display_command, solver_args};
use crate::matrix::Task;

/// Runs the real solver binary, one process per task.
///
/// The solver is asked to stop after `task.time_limit` seconds through `-t`.
/// If it is still running `grace` seconds after that, the process is killed
/// and the task is recorded as failed.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: String,
    grace: Duration,
}

impl ProcessSolver {
    pub fn new(program: impl Into<String>, grace: Duration) -> Self {
        Self {
            program: program.into(),
            grace,
        }
    }

    /// Wall-clock budget after which the process is killed.
    pub fn hard_timeout(&self, task: &Task) -> Duration {
        Duration::from_secs(task.time_limit) + self.grace
    }
}

impl SolverBackend for ProcessSolver {
    fn invoke<'a>(
        &'a mut self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = Invocation> + Send + 'a>> {
        Box::pin(async move {
            match run_solver_inner(&self.program, task, self.hard_timeout(task)).await {
                Ok(stdout) => Invocation::Completed { stdout },
                Err(err) => Invocation::Failed {
                    cause: format!("{err:#}"),
                },
            }
        })
    }

    fn describe(&self, task: &Task) -> String {
        display_command(&self.program, task)
    }
}

async fn run_solver_inner(program: &str, task: &Task, limit: Duration) -> Result<String> {
    let args = solver_args(task);

    info!(
        instance = %task.instance.id(),
        variant = %task.variant.name,
        cmd = %display_command(program, task),
        "starting solver process"
    );

    let mut cmd = Command::new(program);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning solver '{program}'"))?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output: Output = match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(res) => res.with_context(|| format!("waiting for solver '{program}'"))?,
        Err(_) => bail!("solver timed out after {}s and was killed", limit.as_secs()),
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines() {
        debug!(
            instance = %task.instance.id(),
            variant = %task.variant.name,
            "stderr: {}",
            line
        );
    }

    let code = output.status.code();
    info!(
        instance = %task.instance.id(),
        variant = %task.variant.name,
        exit_code = code.unwrap_or(-1),
        success = output.status.success(),
        "solver process exited"
    );

    if !output.status.success() {
        match code {
            Some(code) => bail!("solver exited with code {code}"),
            None => bail!("solver was terminated by a signal"),
        }
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

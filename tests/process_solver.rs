// tests/process_solver.rs
#![cfg(unix)]

mod common;
use crate::common::variants;

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use benchmatrix::engine::{FailureKind, RunOutcome};
use benchmatrix::exec::{Invocation, ProcessSolver, SolverBackend};
use benchmatrix::matrix::{Instance, TaskMatrix, TaskParams};
use benchmatrix_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn stub_solver(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("solver.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn single_task_matrix(time_limit: u64) -> TaskMatrix {
    TaskMatrix::build(
        vec![Instance::from_dataset_file(Path::new("data"), "data/a280.tsp")],
        &[variants(&[("TABU", "tabu")])[0].clone().with_flags("--tenure 7")],
        TaskParams {
            time_limit,
            file_seed: 123,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn solver_receives_full_argument_vector() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let program = stub_solver(dir.path(), r#"echo "cost:$*""#);

    let matrix = single_task_matrix(60);
    let task = matrix.tasks().next().unwrap();
    let mut solver = ProcessSolver::new(program.to_string_lossy(), Duration::from_secs(5));

    match solver.invoke(task).await {
        Invocation::Completed { stdout } => assert_eq!(
            stdout,
            "cost:-f data/a280.tsp -q -alg tabu -t 60 -seed 123 --to_file --tenure 7\n"
        ),
        other => panic!("Expected Completed, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn stderr_chatter_does_not_affect_the_cost() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let program = stub_solver(dir.path(), "echo 'warming up' >&2\necho 'cost: 2579'");

    let matrix = single_task_matrix(60);
    let task = matrix.tasks().next().unwrap();
    let mut solver = ProcessSolver::new(program.to_string_lossy(), Duration::from_secs(5));

    let outcome = RunOutcome::from_invocation(solver.invoke(task).await);
    match outcome {
        RunOutcome::Success(cost) => assert_eq!(cost.as_str(), "2579"),
        other => panic!("Expected Success, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_an_invocation_failure() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let program = stub_solver(dir.path(), "echo 'cost:1'\nexit 3");

    let matrix = single_task_matrix(60);
    let task = matrix.tasks().next().unwrap();
    let mut solver = ProcessSolver::new(program.to_string_lossy(), Duration::from_secs(5));

    match RunOutcome::from_invocation(solver.invoke(task).await) {
        RunOutcome::Failure { kind, cause } => {
            assert_eq!(kind, FailureKind::Invocation);
            assert!(cause.contains("code 3"), "cause was: {cause}");
        }
        other => panic!("Expected Failure, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn missing_binary_is_an_invocation_failure() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let matrix = single_task_matrix(60);
    let task = matrix.tasks().next().unwrap();
    let mut solver = ProcessSolver::new(
        dir.path().join("no-such-solver").to_string_lossy(),
        Duration::from_secs(5),
    );

    match solver.invoke(task).await {
        Invocation::Failed { cause } => assert!(cause.contains("spawning solver")),
        other => panic!("Expected Failed, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn hung_solver_is_killed_after_the_grace_period() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let program = stub_solver(dir.path(), "exec sleep 30");

    let matrix = single_task_matrix(0);
    let task = matrix.tasks().next().unwrap();
    let mut solver = ProcessSolver::new(program.to_string_lossy(), Duration::from_secs(1));
    assert_eq!(solver.hard_timeout(task), Duration::from_secs(1));

    let started = Instant::now();
    let invocation = solver.invoke(task).await;
    assert!(started.elapsed() < Duration::from_secs(10));

    match invocation {
        Invocation::Failed { cause } => assert!(cause.contains("timed out"), "cause was: {cause}"),
        other => panic!("Expected Failed, got {:?}", other),
    }
    Ok(())
}

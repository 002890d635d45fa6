// src/lib.rs

pub mod cli;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod extract;
pub mod fs;
pub mod logging;
pub mod matrix;
pub mod notify;
pub mod output;
pub mod types;

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_and_validate;
use crate::engine::Driver;
use crate::exec::{ProcessSolver, SolverBackend};
use crate::fs::RealFileSystem;
use crate::matrix::{TaskMatrix, TaskParams};
use crate::notify::{FanoutNotifier, TracingNotifier, WebhookConfig, WebhookNotifier};
use crate::output::{ResultWriter, completed_instance_ids, header_for};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - dataset enumeration and the task matrix
/// - the solver process backend
/// - the result writer and notifier sinks
/// - the driver
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_and_validate(&args.config)?;
    if let Some(output) = args.output.clone() {
        cfg.session_mut().output = output;
    }

    let instances = dataset::enumerate(cfg.dataset(), &RealFileSystem)?;
    let matrix = TaskMatrix::build(instances, cfg.variants(), task_params(&cfg))?;

    let session = cfg.session();
    let solver = ProcessSolver::new(
        session.solver.clone(),
        Duration::from_secs(session.grace_period),
    );

    if args.dry_run {
        print_dry_run(&cfg, &matrix, &solver);
        return Ok(());
    }

    let header = header_for(cfg.dataset().mode(), &matrix.variant_names());
    let writer = ResultWriter::open(&session.output, &header, session.failure_marker.clone())?;

    let already_done = if args.resume {
        completed_instance_ids(&session.output)?
    } else {
        HashSet::new()
    };
    if !already_done.is_empty() {
        info!(count = already_done.len(), "resuming; completed instances will be skipped");
    }

    let notifier = build_notifier(&cfg)?;

    let mut driver = Driver::new(matrix, solver, writer, Box::new(notifier), session.report_every)
        .with_title(cfg.notify().title.clone())
        .skipping(already_done);

    let summary = driver.run().await?;
    debug!(?summary, "driver finished");

    Ok(())
}

/// Runtime parameters shared by every task.
pub fn task_params(cfg: &ConfigFile) -> TaskParams {
    TaskParams {
        time_limit: cfg.session().time_limit,
        file_seed: cfg.session().seed,
    }
}

/// Local log sink, plus the webhook sink when its URL is configured.
fn build_notifier(cfg: &ConfigFile) -> Result<FanoutNotifier> {
    let section = cfg.notify();
    let mut notifier = FanoutNotifier::new().with(TracingNotifier::new(section.title.clone()));

    match WebhookConfig::from_section(section) {
        Some(webhook) => {
            info!(title = %webhook.title, "webhook notifications enabled");
            notifier = notifier.with(WebhookNotifier::new(webhook)?);
        }
        None => {
            if let Some(var) = &section.webhook_url_env {
                warn!(env = %var, "webhook URL variable is not set; notifications stay local");
            }
        }
    }

    Ok(notifier)
}

/// Simple dry-run output: print the session settings and the task matrix.
fn print_dry_run(cfg: &ConfigFile, matrix: &TaskMatrix, solver: &impl SolverBackend) {
    let session = cfg.session();

    println!("benchmatrix dry-run");
    println!("  session.solver = {}", session.solver);
    println!("  session.time_limit = {}s (+{}s grace)", session.time_limit, session.grace_period);
    println!("  session.output = {}", session.output.display());
    println!("  session.report_every = {}", session.report_every);
    println!();

    println!("variants ({}):", matrix.variant_count());
    for variant in matrix.variants() {
        println!("  - {}", variant.name);
        println!("      algorithm: {}", variant.algorithm);
        if !variant.flags.is_empty() {
            println!("      flags: {:?}", variant.flags);
        }
    }
    println!();

    println!(
        "instances ({}), {} tasks:",
        matrix.instance_count(),
        matrix.task_count()
    );
    for row in matrix.rows() {
        println!("  [{}] {}", row.index, row.instance.id());
        for task in &row.tasks {
            println!("      {}", solver.describe(task));
        }
    }

    debug!("dry-run complete (no execution)");
}

#![allow(dead_code)]

use std::future::Future;
use std::path::Path;

use tokio::time::{timeout, Duration};

use benchmatrix::engine::Driver;
use benchmatrix::exec::SolverBackend;
use benchmatrix::matrix::{AlgorithmVariant, Instance, TaskMatrix, TaskParams};
use benchmatrix::notify::Notifier;
use benchmatrix::output::{ResultWriter, header_for};
use benchmatrix::types::DatasetMode;

pub const PARAMS: TaskParams = TaskParams {
    time_limit: 60,
    file_seed: 123,
};

/// Fail the test instead of hanging if a session never finishes.
pub async fn with_timeout<F: Future>(fut: F) -> F::Output {
    timeout(Duration::from_secs(5), fut)
        .await
        .expect("session did not finish in time")
}

pub fn variants(list: &[(&str, &str)]) -> Vec<AlgorithmVariant> {
    list.iter()
        .map(|(name, algorithm)| AlgorithmVariant::new(*name, *algorithm))
        .collect()
}

pub fn file_instances(ids: &[&str]) -> Vec<Instance> {
    ids.iter()
        .map(|id| Instance::from_dataset_file(Path::new("data"), format!("data/{id}")))
        .collect()
}

/// A driver over file instances writing to `output`.
pub fn file_driver<S: SolverBackend>(
    instances: Vec<Instance>,
    variants: &[AlgorithmVariant],
    solver: S,
    notifier: impl Notifier + 'static,
    output: &Path,
    report_every: usize,
) -> Driver<S> {
    let matrix = TaskMatrix::build(instances, variants, PARAMS).unwrap();
    let header = header_for(DatasetMode::Files, &matrix.variant_names());
    let writer = ResultWriter::open(output, &header, "error").unwrap();
    Driver::new(matrix, solver, writer, Box::new(notifier), report_every)
}

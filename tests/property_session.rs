mod common;
use crate::common::{file_driver, file_instances};

use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use benchmatrix::matrix::AlgorithmVariant;
use benchmatrix_test_utils::fake_solver::ScriptedSolver;
use benchmatrix_test_utils::init_tracing;
use benchmatrix_test_utils::recording_notifier::RecordingNotifier;

// Grid of (instance, variant) -> does the run succeed.
fn outcome_grid() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (0..6usize, 1..4usize).prop_flat_map(|(instances, variants)| {
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), variants), instances)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_task_runs_once_and_rows_need_a_success(grid in outcome_grid()) {
        init_tracing();
        let variant_count = grid.first().map_or(1, Vec::len);
        let variants: Vec<AlgorithmVariant> = (0..variant_count)
            .map(|v| AlgorithmVariant::new(format!("V{v}"), format!("alg{v}")))
            .collect();
        let ids: Vec<String> = (0..grid.len()).map(|i| format!("inst{i}.tsp")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let mut solver = ScriptedSolver::always_crashing();
        for (i, row) in grid.iter().enumerate() {
            for (v, ok) in row.iter().enumerate() {
                if *ok {
                    solver = solver.prints(&ids[i], &format!("V{v}"), &format!("cost:{}", i * 10 + v));
                }
            }
        }
        let calls = solver.calls();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("results.csv");
        let mut driver = file_driver(
            file_instances(&id_refs),
            &variants,
            solver,
            RecordingNotifier::new(),
            &output,
            20,
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let summary = runtime.block_on(driver.run()).unwrap();

        prop_assert_eq!(calls.lock().unwrap().len(), grid.len() * variant_count);
        prop_assert_eq!(summary.tasks_total, grid.len() * variant_count);
        prop_assert_eq!(summary.tasks_completed, grid.len() * variant_count);

        let expected_rows: Vec<String> = grid
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|ok| *ok))
            .map(|(i, _)| ids[i].clone())
            .collect();
        prop_assert_eq!(summary.rows_written, expected_rows.len());
        prop_assert_eq!(summary.rows_dropped, grid.len() - expected_rows.len());

        let contents = fs::read_to_string(&output).unwrap();
        let mut lines = contents.lines();
        let header = variants
            .iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        prop_assert_eq!(lines.next(), Some(header.as_str()));

        let written: Vec<String> = lines
            .map(|line| line.split(',').next().unwrap_or_default().to_string())
            .collect();
        prop_assert_eq!(written, expected_rows);
    }
}

// src/exec/command.rs

//! Solver argument construction.
//!
//! The argument vector is fixed by the solver's command line:
//!
//! ```text
//! <solver> (-f <path> | -n <nodes>) -q -alg <algorithm> -t <seconds> -seed <int> --to_file [flags...]
//! ```

use crate::matrix::{InstanceSource, Task};

/// Arguments (without the program name) for one solver run.
pub fn solver_args(task: &Task) -> Vec<String> {
    let mut args = Vec::with_capacity(11 + task.variant.flags.len());

    match task.instance.source() {
        InstanceSource::File(path) => {
            args.push("-f".to_string());
            args.push(path.to_string_lossy().into_owned());
        }
        InstanceSource::Synthetic { nodes, .. } => {
            args.push("-n".to_string());
            args.push(nodes.to_string());
        }
    }

    args.push("-q".to_string());
    args.push("-alg".to_string());
    args.push(task.variant.algorithm.clone());
    args.push("-t".to_string());
    args.push(task.time_limit.to_string());
    args.push("-seed".to_string());
    args.push(task.seed.to_string());
    args.push("--to_file".to_string());
    args.extend(task.variant.flags.iter().cloned());

    args
}

/// Human readable command line, for logs and `--dry-run`.
pub fn display_command(program: &str, task: &Task) -> String {
    let mut line = program.to_string();
    for arg in solver_args(task) {
        line.push(' ');
        line.push_str(&arg);
    }
    line
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::matrix::{AlgorithmVariant, Instance};

    fn task(instance: Instance, variant: AlgorithmVariant, seed: u64) -> Task {
        Task {
            instance: Arc::new(instance),
            variant: Arc::new(variant),
            time_limit: 1200,
            seed,
        }
    }

    #[test]
    fn file_instance_arguments() {
        let t = task(
            Instance::from_dataset_file(Path::new("data/temp"), "data/temp/a280.tsp"),
            AlgorithmVariant::new("GREEDY", "GREEDY"),
            123,
        );
        assert_eq!(
            display_command("make/bin/tsp", &t),
            "make/bin/tsp -f data/temp/a280.tsp -q -alg GREEDY -t 1200 -seed 123 --to_file"
        );
    }

    #[test]
    fn synthetic_instance_arguments_with_flags() {
        let t = task(
            Instance::synthetic(4, 300, 9876),
            AlgorithmVariant::new("TABU", "TABU").with_flags("-tenure 10 --verbose"),
            9876,
        );
        assert_eq!(
            solver_args(&t),
            vec![
                "-n", "300", "-q", "-alg", "TABU", "-t", "1200", "-seed", "9876", "--to_file",
                "-tenure", "10", "--verbose"
            ]
        );
    }
}

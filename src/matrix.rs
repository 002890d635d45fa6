// src/matrix.rs

//! The work matrix: which solver runs make up a session, and in what order.
//!
//! Tasks are grouped row-major: all variants of one instance form one
//! [`MatrixRow`], which later becomes one line of the result file. Both the
//! instance order and the variant order of the inputs are preserved, so the
//! same configuration always yields the same row and column order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{BenchError, Result};

/// One algorithm configuration under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmVariant {
    /// Column label in the result file.
    pub name: String,
    /// Value passed to the solver as `-alg`.
    pub algorithm: String,
    /// Extra solver arguments, appended verbatim after the fixed ones.
    pub flags: Vec<String>,
}

impl AlgorithmVariant {
    pub fn new(name: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            algorithm: algorithm.into(),
            flags: Vec::new(),
        }
    }

    /// Set the extra flags from a whitespace separated string.
    pub fn with_flags(mut self, flags: &str) -> Self {
        self.flags = flags.split_whitespace().map(str::to_string).collect();
        self
    }
}

/// Where the solver gets the problem from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceSource {
    /// A dataset file, passed as `-f <path>`.
    File(PathBuf),
    /// A random instance the solver generates itself, passed as `-n <nodes>`
    /// together with `seed`.
    Synthetic { nodes: u32, seed: u64 },
}

/// One problem input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    id: String,
    source: InstanceSource,
}

impl Instance {
    /// Dataset file, labelled with its path relative to the dataset `root`.
    /// Files directly under `root` keep their basename, nested files keep
    /// their subdirectory so equal basenames stay distinct.
    pub fn from_dataset_file(root: &Path, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => {
                rel.to_string_lossy().replace('\\', "/")
            }
            _ => display_name(&path),
        };
        Self {
            id,
            source: InstanceSource::File(path),
        }
    }

    /// Synthetic instance, labelled with its 0-based generation index.
    pub fn synthetic(index: usize, nodes: u32, seed: u64) -> Self {
        Self {
            id: index.to_string(),
            source: InstanceSource::Synthetic { nodes, seed },
        }
    }

    /// Label used as the first cell of the instance's result row.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &InstanceSource {
        &self.source
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Runtime parameters shared by every task of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskParams {
    /// Seconds, passed as `-t`.
    pub time_limit: u64,
    /// Seed for file-based instances.
    pub file_seed: u64,
}

/// A single (instance, variant) solver run with its resolved parameters.
#[derive(Debug, Clone)]
pub struct Task {
    pub instance: Arc<Instance>,
    pub variant: Arc<AlgorithmVariant>,
    pub time_limit: u64,
    pub seed: u64,
}

/// All tasks for one instance, in variant order.
#[derive(Debug, Clone)]
pub struct MatrixRow {
    /// 0-based position of the instance in the session.
    pub index: usize,
    pub instance: Arc<Instance>,
    pub tasks: Vec<Task>,
}

/// Ordered cross-product of instances and variants.
#[derive(Debug, Clone)]
pub struct TaskMatrix {
    variants: Vec<Arc<AlgorithmVariant>>,
    rows: Vec<MatrixRow>,
}

impl TaskMatrix {
    /// Build the matrix, failing before anything runs if a variant has no
    /// algorithm name, if there are no variants at all, or if two instances
    /// carry the same label.
    pub fn build(
        instances: Vec<Instance>,
        variants: &[AlgorithmVariant],
        params: TaskParams,
    ) -> Result<Self> {
        if variants.is_empty() {
            return Err(BenchError::ConfigError(
                "at least one algorithm variant is required".to_string(),
            ));
        }

        if let Some(bad) = variants.iter().find(|v| v.algorithm.trim().is_empty()) {
            return Err(BenchError::MissingConfigKey {
                variant: bad.name.clone(),
                key: "algorithm",
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = instances.iter().find(|i| !seen.insert(i.id().to_string())) {
            return Err(BenchError::ConfigError(format!(
                "two dataset instances share the label '{}'; rows would be indistinguishable",
                dup.id()
            )));
        }

        let variants: Vec<_> = variants.iter().cloned().map(Arc::new).collect();

        let rows = instances
            .into_iter()
            .enumerate()
            .map(|(index, instance)| {
                let instance = Arc::new(instance);
                let seed = match instance.source() {
                    InstanceSource::File(_) => params.file_seed,
                    InstanceSource::Synthetic { seed, .. } => *seed,
                };
                let tasks = variants
                    .iter()
                    .map(|variant| Task {
                        instance: Arc::clone(&instance),
                        variant: Arc::clone(variant),
                        time_limit: params.time_limit,
                        seed,
                    })
                    .collect();
                MatrixRow {
                    index,
                    instance,
                    tasks,
                }
            })
            .collect();

        Ok(Self { variants, rows })
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn variants(&self) -> &[Arc<AlgorithmVariant>] {
        &self.variants
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }

    pub fn instance_count(&self) -> usize {
        self.rows.len()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// `instances × variants`.
    pub fn task_count(&self) -> usize {
        self.instance_count() * self.variant_count()
    }

    /// Every task in execution order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.rows.iter().flat_map(|row| row.tasks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: TaskParams = TaskParams {
        time_limit: 60,
        file_seed: 123,
    };

    fn variants() -> Vec<AlgorithmVariant> {
        vec![
            AlgorithmVariant::new("GREEDY", "GREEDY"),
            AlgorithmVariant::new("2OPT_GREEDY", "2OPT_GREEDY").with_flags("-v  1"),
        ]
    }

    #[test]
    fn tasks_are_grouped_by_instance_in_input_order() {
        let instances = vec![
            Instance::from_dataset_file(Path::new("data"), "data/b.tsp"),
            Instance::from_dataset_file(Path::new("data"), "data/a.tsp"),
        ];
        let matrix = TaskMatrix::build(instances, &variants(), PARAMS).unwrap();

        let order: Vec<_> = matrix
            .tasks()
            .map(|t| format!("{}/{}", t.instance.id(), t.variant.name))
            .collect();
        assert_eq!(
            order,
            vec![
                "b.tsp/GREEDY",
                "b.tsp/2OPT_GREEDY",
                "a.tsp/GREEDY",
                "a.tsp/2OPT_GREEDY"
            ]
        );
        assert_eq!(matrix.task_count(), 4);
        assert_eq!(matrix.rows()[1].index, 1);
    }

    #[test]
    fn seeds_follow_instance_kind() {
        let instances = vec![
            Instance::from_dataset_file(Path::new("."), "x.tsp"),
            Instance::synthetic(0, 100, 77),
        ];
        let matrix = TaskMatrix::build(instances, &variants(), PARAMS).unwrap();

        assert!(matrix.rows()[0].tasks.iter().all(|t| t.seed == 123));
        assert!(matrix.rows()[1].tasks.iter().all(|t| t.seed == 77));
        assert_eq!(matrix.rows()[1].instance.id(), "0");
    }

    #[test]
    fn blank_algorithm_is_rejected_before_running() {
        let mut vs = variants();
        vs.push(AlgorithmVariant::new("BROKEN", ""));

        let err = TaskMatrix::build(vec![Instance::from_dataset_file(Path::new("."), "a.tsp")], &vs, PARAMS).unwrap_err();
        assert!(matches!(err, BenchError::MissingConfigKey { ref variant, .. } if variant == "BROKEN"));
    }

    #[test]
    fn duplicate_instance_labels_are_rejected() {
        let instances = vec![
            Instance::from_dataset_file(Path::new("data/a"), "data/a/x.tsp"),
            Instance::from_dataset_file(Path::new("data/b"), "data/b/x.tsp"),
        ];
        let err = TaskMatrix::build(instances, &variants(), PARAMS).unwrap_err();
        assert!(matches!(err, BenchError::ConfigError(ref msg) if msg.contains("'x.tsp'")));
    }

    #[test]
    fn nested_dataset_files_keep_their_subdirectory() {
        let root = Path::new("data");
        let instances = vec![
            Instance::from_dataset_file(root, "data/a/x.tsp"),
            Instance::from_dataset_file(root, "data/b/x.tsp"),
            Instance::from_dataset_file(root, "data/top.tsp"),
        ];
        let ids: Vec<_> = instances.iter().map(|i| i.id().to_string()).collect();
        assert_eq!(ids, vec!["a/x.tsp", "b/x.tsp", "top.tsp"]);

        let matrix = TaskMatrix::build(instances, &variants(), PARAMS).unwrap();
        assert_eq!(matrix.instance_count(), 3);
    }

    #[test]
    fn flags_are_split_on_whitespace() {
        assert_eq!(variants()[1].flags, vec!["-v".to_string(), "1".to_string()]);
    }

    #[test]
    fn empty_instance_list_gives_empty_matrix() {
        let matrix = TaskMatrix::build(Vec::new(), &variants(), PARAMS).unwrap();
        assert_eq!(matrix.task_count(), 0);
        assert_eq!(matrix.variant_names(), vec!["GREEDY", "2OPT_GREEDY"]);
    }
}

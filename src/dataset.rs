// src/dataset.rs

//! Instance discovery.
//!
//! File datasets are found by walking a directory tree; synthetic datasets
//! are a list of (node count, seed) pairs the solver turns into random
//! instances itself. Either way the returned order is deterministic for a
//! given input, which is what makes result files reproducible.

use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{DatasetSource, RandomSection};
use crate::errors::{BenchError, Result};
use crate::fs::FileSystem;
use crate::matrix::Instance;

/// Enumerate the instances of a configured dataset.
pub fn enumerate(source: &DatasetSource, fs: &dyn FileSystem) -> Result<Vec<Instance>> {
    match source {
        DatasetSource::Dir { root, include } => {
            let files = discover_files(fs, root, include)?;
            Ok(files
                .into_iter()
                .map(|path| Instance::from_dataset_file(root, path))
                .collect())
        }
        DatasetSource::Random(random) => Ok(generate_random(random)),
    }
}

/// Every file below `root` whose path relative to `root` matches one of
/// `include` (all files when `include` is empty), sorted by path.
pub fn discover_files(fs: &dyn FileSystem, root: &Path, include: &[String]) -> Result<Vec<PathBuf>> {
    if !fs.is_dir(root) {
        return Err(BenchError::ConfigError(format!(
            "dataset directory {:?} does not exist or is not a directory",
            root
        )));
    }

    let filter = if include.is_empty() {
        None
    } else {
        Some(build_globset(include)?)
    };

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                let keep = match (&filter, path.strip_prefix(root)) {
                    (None, _) => true,
                    (Some(set), Ok(rel)) => {
                        set.is_match(rel.to_string_lossy().replace('\\', "/"))
                    }
                    (Some(_), Err(_)) => false,
                };
                if keep {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    debug!(root = ?root, count = files.len(), "discovered dataset files");
    Ok(files)
}

/// `count` synthetic instances with node counts and seeds drawn uniformly
/// from the configured ranges.
pub fn generate_random(section: &RandomSection) -> Vec<Instance> {
    let mut rng = match section.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..section.count)
        .map(|index| {
            let nodes = rng.gen_range(section.min_nodes..=section.max_nodes);
            let seed = rng.gen_range(section.min_seed..=section.max_seed);
            Instance::synthetic(index, nodes, seed)
        })
        .collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid include pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build().context("building include globset")?)
}

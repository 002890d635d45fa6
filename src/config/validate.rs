// src/config/validate.rs

use crate::config::model::{ConfigFile, DatasetSection, DatasetSource, RawConfigFile, RawVariantConfig};
use crate::errors::{BenchError, Result};
use crate::matrix::AlgorithmVariant;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BenchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_session(&raw)?;
        let dataset = resolve_dataset(&raw.dataset)?;
        let variants = resolve_variants(&raw.variant)?;
        Ok(ConfigFile::new_unchecked(raw.session, dataset, raw.notify, variants))
    }
}

fn validate_session(cfg: &RawConfigFile) -> Result<()> {
    let session = &cfg.session;

    if session.solver.trim().is_empty() {
        return Err(BenchError::ConfigError(
            "[session].solver must not be empty".to_string(),
        ));
    }

    if session.report_every == 0 {
        return Err(BenchError::ConfigError(
            "[session].report_every must be >= 1 (got 0)".to_string(),
        ));
    }

    if session.failure_marker.is_empty() {
        return Err(BenchError::ConfigError(
            "[session].failure_marker must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn resolve_dataset(section: &DatasetSection) -> Result<DatasetSource> {
    match (&section.dir, &section.random) {
        (Some(_), Some(_)) => Err(BenchError::ConfigError(
            "[dataset] must set either `dir` or [dataset.random], not both".to_string(),
        )),
        (None, None) => Err(BenchError::ConfigError(
            "[dataset] must set either `dir` or [dataset.random]".to_string(),
        )),
        (Some(dir), None) => Ok(DatasetSource::Dir {
            root: dir.clone(),
            include: section.include.clone(),
        }),
        (None, Some(random)) => {
            if random.min_nodes == 0 {
                return Err(BenchError::ConfigError(
                    "[dataset.random].min_nodes must be >= 1 (got 0)".to_string(),
                ));
            }
            if random.min_nodes > random.max_nodes {
                return Err(BenchError::ConfigError(format!(
                    "[dataset.random] node range is empty: {}..={}",
                    random.min_nodes, random.max_nodes
                )));
            }
            if random.min_seed > random.max_seed {
                return Err(BenchError::ConfigError(format!(
                    "[dataset.random] seed range is empty: {}..={}",
                    random.min_seed, random.max_seed
                )));
            }
            Ok(DatasetSource::Random(random.clone()))
        }
    }
}

fn resolve_variants(raw: &[(String, RawVariantConfig)]) -> Result<Vec<AlgorithmVariant>> {
    if raw.is_empty() {
        return Err(BenchError::ConfigError(
            "config must contain at least one [variant.<name>] section".to_string(),
        ));
    }

    raw.iter()
        .map(|(name, variant)| {
            let algorithm = variant
                .algorithm
                .as_deref()
                .map(str::trim)
                .filter(|alg| !alg.is_empty())
                .ok_or_else(|| BenchError::MissingConfigKey {
                    variant: name.clone(),
                    key: "algorithm",
                })?;

            Ok(AlgorithmVariant::new(name.clone(), algorithm).with_flags(&variant.flags))
        })
        .collect()
}

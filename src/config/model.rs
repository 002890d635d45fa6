// src/config/model.rs

use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::matrix::AlgorithmVariant;
use crate::types::{DatasetMode, Level};

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [session]
/// solver = "make/bin/tsp"
/// time_limit = 1200
/// output = "results/heuristic.csv"
///
/// [dataset]
/// dir = "data/temp"
///
/// [variant.GREEDY]
/// algorithm = "GREEDY"
///
/// [variant.2OPT_GREEDY]
/// algorithm = "2OPT_GREEDY"
/// flags = "-v 2"
/// ```
///
/// Variants are kept in document order: that order is the column order of
/// the result file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub session: SessionSection,

    #[serde(default)]
    pub dataset: DatasetSection,

    #[serde(default)]
    pub notify: NotifySection,

    /// All variants from `[variant.<name>]`, in document order.
    #[serde(default, deserialize_with = "ordered_variants")]
    pub variant: Vec<(String, RawVariantConfig)>,
}

/// `[session]` section: how each solver run is invoked and where results go.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// Path or name of the solver binary.
    pub solver: String,

    /// Per-task time budget in seconds, passed as `-t`.
    #[serde(default = "default_time_limit")]
    pub time_limit: u64,

    /// Seed passed as `-seed` for file-based instances.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Extra seconds granted on top of `time_limit` before the solver process
    /// is killed.
    #[serde(default = "default_grace_period")]
    pub grace_period: u64,

    /// CSV file receiving one row per instance.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Emit a "Done <index> documents" event every this many instances.
    #[serde(default = "default_report_every")]
    pub report_every: usize,

    /// Cell written for a variant that failed on an instance.
    #[serde(default = "default_failure_marker")]
    pub failure_marker: String,
}

fn default_time_limit() -> u64 {
    1200
}

fn default_seed() -> u64 {
    123
}

fn default_grace_period() -> u64 {
    30
}

fn default_output() -> PathBuf {
    PathBuf::from("results/results.csv")
}

fn default_report_every() -> usize {
    20
}

fn default_failure_marker() -> String {
    "error".to_string()
}

impl SessionSection {
    /// Session settings with every optional key at its default.
    pub fn new(solver: impl Into<String>) -> Self {
        Self {
            solver: solver.into(),
            time_limit: default_time_limit(),
            seed: default_seed(),
            grace_period: default_grace_period(),
            output: default_output(),
            report_every: default_report_every(),
            failure_marker: default_failure_marker(),
        }
    }
}

/// `[dataset]` section. Exactly one of `dir` or `[dataset.random]` must be set.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatasetSection {
    /// Directory walked recursively for instance files.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Glob patterns (relative to `dir`) selecting instance files. Empty means
    /// every file.
    #[serde(default)]
    pub include: Vec<String>,

    /// Synthetic instances generated by the solver itself.
    #[serde(default)]
    pub random: Option<RandomSection>,
}

/// `[dataset.random]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RandomSection {
    /// Number of synthetic instances.
    pub count: usize,

    pub min_nodes: u32,
    pub max_nodes: u32,

    #[serde(default)]
    pub min_seed: u64,

    #[serde(default = "default_max_seed")]
    pub max_seed: u64,

    /// Seeds the generator for reproducible instance parameters.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_max_seed() -> u64 {
    1_000_000
}

/// `[notify]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifySection {
    /// Label prefixed to every relayed message.
    #[serde(default = "default_title")]
    pub title: String,

    /// Name of the environment variable holding the webhook URL. When unset,
    /// events only go to the local log.
    #[serde(default)]
    pub webhook_url_env: Option<String>,

    /// Events below this level are not relayed to the webhook.
    #[serde(default)]
    pub min_level: Level,
}

fn default_title() -> String {
    "benchmark".to_string()
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            title: default_title(),
            webhook_url_env: None,
            min_level: Level::default(),
        }
    }
}

/// `[variant.<name>]` section as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVariantConfig {
    /// Algorithm identifier passed as `-alg`. Required; checked during
    /// validation so the error can name the variant.
    #[serde(default)]
    pub algorithm: Option<String>,

    /// Extra solver flags, whitespace separated.
    #[serde(default)]
    pub flags: String,
}

/// Where instances come from, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Dir { root: PathBuf, include: Vec<String> },
    Random(RandomSection),
}

impl DatasetSource {
    pub fn mode(&self) -> DatasetMode {
        match self {
            DatasetSource::Dir { .. } => DatasetMode::Files,
            DatasetSource::Random(_) => DatasetMode::Random,
        }
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    session: SessionSection,
    dataset: DatasetSource,
    notify: NotifySection,
    variants: Vec<AlgorithmVariant>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        session: SessionSection,
        dataset: DatasetSource,
        notify: NotifySection,
        variants: Vec<AlgorithmVariant>,
    ) -> Self {
        Self {
            session,
            dataset,
            notify,
            variants,
        }
    }

    pub fn session(&self) -> &SessionSection {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionSection {
        &mut self.session
    }

    pub fn dataset(&self) -> &DatasetSource {
        &self.dataset
    }

    pub fn notify(&self) -> &NotifySection {
        &self.notify
    }

    /// Variants in column order.
    pub fn variants(&self) -> &[AlgorithmVariant] {
        &self.variants
    }
}

fn ordered_variants<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, RawVariantConfig)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct VariantsVisitor;

    impl<'de> Visitor<'de> for VariantsVisitor {
        type Value = Vec<(String, RawVariantConfig)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of [variant.<name>] sections")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut variants = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, variant)) = map.next_entry::<String, RawVariantConfig>()? {
                variants.push((name, variant));
            }
            Ok(variants)
        }
    }

    deserializer.deserialize_map(VariantsVisitor)
}

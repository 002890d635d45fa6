// src/types.rs

use std::fmt;

use serde::Deserialize;

/// Severity of a notifier event.
///
/// Ordered so that `Info < Warning < Error`, which lets sinks filter on a
/// minimum level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the benchmark instances are produced.
///
/// The mode decides the header layout of the result file and how rows are
/// labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetMode {
    /// Instances are files found under a directory.
    Files,
    /// Instances are generated on the fly by the solver (`-n <nodes>`).
    Random,
}

// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only fatal conditions live here. A solver run that crashes or prints
//! garbage is not an error: it becomes a [`crate::engine::RunOutcome::Failure`]
//! and the session keeps going.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Variant '{variant}' is missing required key `{key}`")]
    MissingConfigKey { variant: String, key: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error(
        "Output file {path:?} already has header {found:?}, expected {expected:?}"
    )]
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BenchError>;

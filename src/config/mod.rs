// src/config/mod.rs

//! Configuration loading and validation for benchmatrix.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Turn a `RawConfigFile` into a validated `ConfigFile` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, DatasetSection, DatasetSource, NotifySection, RandomSection, RawConfigFile,
    RawVariantConfig, SessionSection,
};

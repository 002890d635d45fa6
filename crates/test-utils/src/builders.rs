use std::path::PathBuf;

use benchmatrix::config::{
    DatasetSection, NotifySection, RawConfigFile, RawVariantConfig, SessionSection,
};

/// Builder for `RawConfigFile` to simplify validation tests.
///
/// Starts from a file dataset rooted at `data` and a solver called `tsp`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                session: SessionSection::new("tsp"),
                dataset: DatasetSection {
                    dir: Some(PathBuf::from("data")),
                    ..DatasetSection::default()
                },
                notify: NotifySection::default(),
                variant: Vec::new(),
            },
        }
    }

    pub fn with_variant(mut self, name: &str, variant: RawVariantConfig) -> Self {
        self.config.variant.push((name.to_string(), variant));
        self
    }

    pub fn with_report_every(mut self, every: usize) -> Self {
        self.config.session.report_every = every;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawVariantConfig`.
pub struct VariantBuilder {
    variant: RawVariantConfig,
}

impl VariantBuilder {
    pub fn new(algorithm: &str) -> Self {
        Self {
            variant: RawVariantConfig {
                algorithm: Some(algorithm.to_string()),
                flags: String::new(),
            },
        }
    }

    /// A variant without `algorithm`, for configuration error tests.
    pub fn without_algorithm() -> Self {
        Self {
            variant: RawVariantConfig::default(),
        }
    }

    pub fn flags(mut self, flags: &str) -> Self {
        self.variant.flags = flags.to_string();
        self
    }

    pub fn build(self) -> RawVariantConfig {
        self.variant
    }
}

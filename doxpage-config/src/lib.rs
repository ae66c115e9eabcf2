//! Shared configuration loader for doxpage.
//!
//! `defaults/doxpage.default.toml` is embedded into the binary so the documented
//! defaults and the runtime behavior never drift apart. User files are layered
//! on top through [`Loader`] before deserializing into [`DoxpageConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use doxpage_core::rewrite::{BoldMacro, RewriteOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/doxpage.default.toml");

/// Name of the per-project override file looked up in the working directory.
pub const PROJECT_FILE: &str = "doxpage.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DoxpageConfig {
    pub paths: PathsConfig,
    pub page: PageConfig,
    pub rules: RulesConfig,
}

/// Where the source is read from and the page written to.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub bold_macro: BoldMacro,
}

impl DoxpageConfig {
    /// Options for building the page pipeline.
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            title: self.page.title.clone(),
            bold_macro: self.rules.bold_macro,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DoxpageConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DoxpageConfig, ConfigError> {
    Loader::new().build()
}

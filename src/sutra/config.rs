//! Configuration loading for the sutra toolchain.
//!
//! `defaults/sutra.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Callers layer user files and environment variables on top of
//! those defaults via [`Loader`] before deserializing into [`SutraConfig`].

use crate::sutra::compiler::CompileOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/sutra.default.toml");

/// Name of the optional project file picked up from the working directory.
pub const PROJECT_FILE: &str = "sutra.toml";

/// Prefix of environment overrides, e.g. `SUTRA__RUNTIME__NODE`.
pub const ENV_PREFIX: &str = "SUTRA";

/// Top-level configuration consumed by sutra applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SutraConfig {
    pub source: SourceConfig,
    pub compile: CompileOptions,
    pub runtime: RuntimeConfig,
}

/// Which files count as sutra sources.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub extension: String,
}

/// How compiled programs are executed.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    pub node: String,
    pub invalid_syntax_marker: String,
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

    /// Layer `SUTRA__SECTION__KEY` environment variables.
    pub fn with_environment(mut self) -> Self {
        self.builder = self
            .builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));
        self
    }

    /// Apply a single key/value override, e.g. `--loop-tracking` from the CLI.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SutraConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

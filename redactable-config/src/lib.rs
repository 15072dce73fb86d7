//! Shared configuration loader for the redactable toolchain.
//!
//! `defaults/redactable.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`RedactableConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use redactable::{Error, StrategySet};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/redactable.default.toml");

/// Top-level configuration consumed by redactable applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactableConfig {
    pub redact: RedactConfig,
    pub inspect: InspectConfig,
}

/// Controls which strategies the redaction pass runs.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactConfig {
    pub strategies: Vec<String>,
}

impl RedactConfig {
    /// Build the strategy set the configuration names.
    pub fn strategy_set(&self) -> Result<StrategySet, Error> {
        StrategySet::from_names(&self.strategies)
    }
}

/// Controls tree dump output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub pretty: bool,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RedactableConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RedactableConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.redact.strategies, vec!["link", "image", "annotation"]);
        assert!(config.inspect.pretty);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("inspect.pretty", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.inspect.pretty);
    }

    #[test]
    fn default_strategies_resolve() {
        let config = load_defaults().expect("defaults to deserialize");
        let set = config.redact.strategy_set().expect("built-in names");
        assert!(set.get("link").is_some());
        assert!(set.get("annotation").is_some());
    }

    #[test]
    fn unknown_strategy_name_is_an_error() {
        let config = Loader::new()
            .set_override("redact.strategies", vec!["link", "censor"])
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.redact.strategy_set().is_err());
    }
}

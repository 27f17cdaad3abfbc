use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Database url cannot be empty")]
    EmptyDatabaseUrl,

    #[error("Invalid poll interval: {0} ms. Must be positive")]
    InvalidPollInterval(u64),

    #[error("Invalid max poll attempts: 0. Omit the setting to poll indefinitely")]
    ZeroPollAttempts,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Oracle base url cannot be empty")]
    EmptyOracleBaseUrl,
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, lowest to highest precedence:
    /// programmatic defaults, `.rapport/config.yaml`, `.rapport/local.yaml`,
    /// then `RAPPORT_*` environment variables.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".rapport/config.yaml"))
            .merge(Yaml::file(".rapport/local.yaml"))
            .merge(Env::prefixed("RAPPORT_").split("__"))
            .extract()
            .context("failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load from one explicit file over the defaults.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if config.oracle.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyOracleBaseUrl);
        }
        if config.photo.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(config.photo.poll_interval_ms));
        }
        if config.photo.max_poll_attempts == Some(0) {
            return Err(ConfigError::ZeroPollAttempts);
        }
        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
        match config.logging.format.as_str() {
            "pretty" | "json" => {}
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ConfigLoader::validate(&Config::default()).expect("defaults are valid");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = Config::default();
        config.photo.poll_interval_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPollInterval(0))
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "photo:\n  poll_interval_ms: 250\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.photo.poll_interval_ms, 250);
        // Untouched sections keep their defaults.
        assert_eq!(config.logging.level, "info");
    }
}

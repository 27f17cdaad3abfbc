//! Application configuration model.
//!
//! Loaded by `infrastructure::config::ConfigLoader` with hierarchical
//! merging (defaults, project yaml, local overrides, `RAPPORT_*` env vars).

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub oracle: OracleConfig,
    pub photo: PhotoConfig,
    pub logging: LoggingConfig,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite:.rapport/rapport.db`.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: "sqlite:.rapport/rapport.db".to_string() }
    }
}

/// Language-oracle call settings. The API key is read from the
/// `RAPPORT_ORACLE_API_KEY` environment variable, never from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
    /// Low variance suits constrained, classification-style output.
    pub temperature: f64,
    /// Upper bound on any single call's output budget; the orchestrator's
    /// per-step budgets never exceed it.
    pub max_tokens: usize,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 400,
            timeout_secs: 120,
        }
    }
}

/// Photo ingest and moderation-wait settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Cadence of the blocking moderation poll.
    pub poll_interval_ms: u64,
    /// Optional cap on poll attempts. `None` waits indefinitely, which is
    /// the intended production behavior: the photo cannot be discussed
    /// before the worker finishes.
    pub max_poll_attempts: Option<u32>,
    /// Directory images are uploaded to before ingestion.
    pub staging_dir: String,
    /// Directory ingested images are relocated to.
    pub permanent_dir: String,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_poll_attempts: None,
            staging_dir: ".rapport/staging".to_string(),
            permanent_dir: ".rapport/photos".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of: trace, debug, info, warn, error.
    pub level: String,
    /// One of: pretty, json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

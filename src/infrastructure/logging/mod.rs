//! Tracing initialization.

use anyhow::{bail, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

fn parse_log_level(level: &str) -> Result<Level> {
    Ok(match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("invalid log level: {other}"),
    })
}

/// Initialize the global subscriber. `RUST_LOG` overrides the configured
/// default level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_target(true)
                .init();
        }
        "pretty" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        other => bail!("invalid log format: {other}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_covers_all_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(parse_log_level(level).is_ok());
        }
        assert!(parse_log_level("loud").is_err());
    }
}

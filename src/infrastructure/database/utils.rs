use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Parse an RFC3339 timestamp stored as TEXT.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp: {s}"))
}

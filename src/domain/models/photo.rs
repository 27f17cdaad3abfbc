//! Photo asset domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the uploaded image is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoRole {
    /// A profile photo of the user themself.
    SelfPortrait,
    /// A face-scan capture used for identity verification.
    Scan,
}

impl PhotoRole {
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoRole::SelfPortrait => "self",
            PhotoRole::Scan => "scan",
        }
    }
}

impl fmt::Display for PhotoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(PhotoRole::SelfPortrait),
            "scan" => Ok(PhotoRole::Scan),
            other => Err(format!("unknown photo role: {other}")),
        }
    }
}

/// Moderation lifecycle. Starts `Pending`; the out-of-process verification
/// worker moves it exactly once to a terminal value and it never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Confirmed,
    Rejected,
    Duplicate,
}

impl ModerationStatus {
    /// Whether the worker has finished with this asset.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ModerationStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Confirmed => "confirmed",
            ModerationStatus::Rejected => "rejected",
            ModerationStatus::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "confirmed" => Ok(ModerationStatus::Confirmed),
            "rejected" => Ok(ModerationStatus::Rejected),
            "duplicate" => Ok(ModerationStatus::Duplicate),
            other => Err(format!("unknown moderation status: {other}")),
        }
    }
}

/// An image that has been relocated from staging to the permanent area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAsset {
    pub id: i64,
    pub user_id: String,
    pub storage_path: String,
    pub role: PhotoRole,
    pub status: ModerationStatus,
    pub vectorized: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!ModerationStatus::Pending.is_terminal());
        assert!(ModerationStatus::Confirmed.is_terminal());
        assert!(ModerationStatus::Rejected.is_terminal());
        assert!(ModerationStatus::Duplicate.is_terminal());
    }
}

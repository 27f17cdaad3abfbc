//! Conversation memory domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a memory turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Speaker::User),
            "assistant" => Ok(Speaker::Assistant),
            other => Err(format!("unknown speaker: {other}")),
        }
    }
}

/// Memory layer tag. The orchestrator reads and writes only `Short`; the
/// `Long` layer holds durable profile facts maintained elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryLayer {
    Short,
    Long,
}

impl MemoryLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            MemoryLayer::Short => "short",
            MemoryLayer::Long => "long",
        }
    }
}

impl fmt::Display for MemoryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(MemoryLayer::Short),
            "long" => Ok(MemoryLayer::Long),
            other => Err(format!("unknown memory layer: {other}")),
        }
    }
}

/// One append-only transcript turn. Replay order is `(created_at, id)`
/// ascending; nothing is ever updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryTurn {
    pub id: i64,
    pub user_id: String,
    pub speaker: Speaker,
    pub content: String,
    pub layer: MemoryLayer,
    pub created_at: DateTime<Utc>,
}

/// A turn about to be appended; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewMemoryTurn {
    pub user_id: String,
    pub speaker: Speaker,
    pub content: String,
    pub layer: MemoryLayer,
}

impl NewMemoryTurn {
    /// A short-layer turn, the common case for the orchestrator.
    pub fn short(user_id: &str, speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            user_id: user_id.to_string(),
            speaker,
            content: content.into(),
            layer: MemoryLayer::Short,
        }
    }
}

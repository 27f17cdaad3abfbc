use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Speaker;

/// One entry of the transcript handed to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::Assistant, text: text.into() }
    }
}

/// A single completion request: leading system framing plus the ordered
/// conversation transcript. Parameters are tuned low and short because the
/// oracle's replies are parsed for control tokens and scores.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub system: String,
    pub transcript: Vec<ChatTurn>,
    pub temperature: f64,
    pub max_tokens: usize,
}

impl OracleRequest {
    pub fn new(
        system: impl Into<String>,
        transcript: Vec<ChatTurn>,
        temperature: f64,
        max_tokens: usize,
    ) -> Self {
        Self { system: system.into(), transcript, temperature, max_tokens }
    }
}

/// The conversational language model, treated as an opaque oracle:
/// transcript in, free text out. Called at most once per logical step of a
/// turn, never overlapping within one turn, and never retried here.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, request: OracleRequest) -> Result<String>;
}

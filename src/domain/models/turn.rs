//! Inbound and outbound turn envelopes.

use serde::{Deserialize, Serialize};

/// One inbound conversational turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Free text typed (or transcribed) by the user.
    #[serde(default)]
    pub free_text: Option<String>,
    /// Control text asserted by the client on the assistant's behalf,
    /// scanned for trigger tokens before any other handling.
    #[serde(default)]
    pub client_control_text: Option<String>,
    /// URLs of images attached to this turn, still in the staging area.
    #[serde(default)]
    pub image_refs: Vec<String>,
}

impl TurnRequest {
    /// Trimmed free text, or `None` when empty.
    pub fn text(&self) -> Option<&str> {
        self.free_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// First attached image, if any. Later images in the same turn are
    /// ignored, matching the one-photo-per-turn ingest flow.
    pub fn first_image(&self) -> Option<&str> {
        self.image_refs
            .iter()
            .map(String::as_str)
            .find(|u| !u.trim().is_empty())
    }
}

/// The user-visible reply for a successfully handled turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReply {
    pub visible_text: String,
}

impl TurnReply {
    pub fn new(visible_text: impl Into<String>) -> Self {
        Self { visible_text: visible_text.into() }
    }
}

//! Wire-level control tokens and marker prefixes.
//!
//! State that must survive restarts is encoded as literal line prefixes on
//! stored assistant turns, and transitions between client, core, and oracle
//! travel as small fixed-shape text tokens instead of a structured envelope.
//! The string forms here are the compatibility surface; everything else in
//! the crate works on the typed projections below, computed once per turn.

use crate::domain::models::survey::SurveyKind;
use crate::domain::models::ModerationStatus;

/// Prefix of a stored assistant turn that poses a survey question. The exact
/// catalog prompt text follows on the next line.
pub const STIMULUS_PREFIX: &str = "[STIMULUS]";

/// Marker recorded when a photo has been ingested and the conversation is
/// blocked on the moderation worker.
pub const PHOTO_PENDING_MARKER: &str = "[PHOTO_PENDING]";

/// Marker recorded once the photo flow has produced its reaction.
pub const PHOTO_DONE_MARKER: &str = "[PHOTO_DONE]";

/// Stand-in user message for oracle calls that have no real user input.
pub const AUTO_CONTINUE_TOKEN: &str = "[AUTO_CONTINUE]";

/// Status tokens the oracle is primed to interpret after moderation.
pub const PHOTO_STATUS_CONFIRMED_TOKEN: &str = "[PHOTO_STATUS_CONFIRMED]";
pub const PHOTO_STATUS_REJECTED_TOKEN: &str = "[PHOTO_STATUS_REJECTED]";
pub const PHOTO_STATUS_DUPLICATE_TOKEN: &str = "[PHOTO_STATUS_DUPLICATE]";

/// Camera-capture token, relayed verbatim to the client so it can open the
/// face scanner. Never stored, never sent to the oracle.
pub const CAMERA_CAPTURE_TOKEN: &str = r#"{"trigger":"FaceScannerTrigger"}"#;

/// Kickoff stimulus recorded when the photo phase starts.
pub const PHOTO_PHASE_START_STIMULUS: &str = "photo_user_phase_start";

/// Map a moderation status (or its absence) to the control token handed to
/// the oracle.
pub fn status_token(status: Option<ModerationStatus>) -> &'static str {
    match status {
        Some(ModerationStatus::Confirmed) => PHOTO_STATUS_CONFIRMED_TOKEN,
        Some(ModerationStatus::Rejected) => PHOTO_STATUS_REJECTED_TOKEN,
        Some(ModerationStatus::Duplicate) => PHOTO_STATUS_DUPLICATE_TOKEN,
        Some(ModerationStatus::Pending) | None => AUTO_CONTINUE_TOKEN,
    }
}

/// Typed view of the stimulus markers, computed once per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StimulusState {
    /// No unresolved stimulus marker in memory.
    None,
    /// The pending stimulus text matches a catalog item exactly.
    Known { kind: SurveyKind, position: u32, text: String },
    /// A stimulus is pending but matches no catalog item; routed to the
    /// generic continuation path, never scored.
    Unknown(String),
}

/// Typed view of the photo-flow markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFlowState {
    /// No photo flow marker recorded.
    None,
    /// A photo was ingested and the flow awaits a terminal status.
    Pending,
    /// The photo flow has already produced its reaction.
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_token_maps_terminals_and_defaults_to_continue() {
        assert_eq!(
            status_token(Some(ModerationStatus::Confirmed)),
            PHOTO_STATUS_CONFIRMED_TOKEN
        );
        assert_eq!(
            status_token(Some(ModerationStatus::Rejected)),
            PHOTO_STATUS_REJECTED_TOKEN
        );
        assert_eq!(
            status_token(Some(ModerationStatus::Duplicate)),
            PHOTO_STATUS_DUPLICATE_TOKEN
        );
        assert_eq!(status_token(Some(ModerationStatus::Pending)), AUTO_CONTINUE_TOKEN);
        assert_eq!(status_token(None), AUTO_CONTINUE_TOKEN);
    }
}

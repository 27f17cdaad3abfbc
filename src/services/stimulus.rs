//! Pending-stimulus and photo-flow state, recovered from stored markers.
//!
//! Nothing about "which question is open" lives in a session object; it is
//! re-derived every turn from the newest marked assistant turn, which is
//! what makes the conversation resumable after a restart.

use anyhow::Result;

use crate::domain::models::protocol::{
    PHOTO_DONE_MARKER, PHOTO_PENDING_MARKER, STIMULUS_PREFIX,
};
use crate::domain::models::{MemoryLayer, PhotoFlowState, StimulusState};
use crate::domain::ports::MemoryRepository;
use crate::services::catalog::SurveyCatalog;

pub struct StimulusTracker;

impl StimulusTracker {
    /// Resolve the user's pending stimulus, if any.
    ///
    /// Looks up the newest stimulus-marked assistant turn, strips the marker
    /// line, and matches the remainder against the catalog by exact
    /// equality. Text that matches nothing still counts as a pending
    /// stimulus; it just can never be scored.
    pub async fn current<M: MemoryRepository>(
        memory: &M,
        catalog: &SurveyCatalog,
        user_id: &str,
    ) -> Result<StimulusState> {
        let Some(turn) = memory
            .latest_assistant_with_prefix(user_id, MemoryLayer::Short, &[STIMULUS_PREFIX])
            .await?
        else {
            return Ok(StimulusState::None);
        };

        let text = turn
            .content
            .strip_prefix(STIMULUS_PREFIX)
            .unwrap_or(&turn.content)
            .trim_start_matches(['\n', '\r'])
            .trim()
            .to_string();

        match catalog.match_stimulus(&text) {
            Some((kind, item)) => Ok(StimulusState::Known {
                kind,
                position: item.position,
                text,
            }),
            None => Ok(StimulusState::Unknown(text)),
        }
    }

    /// Resolve the photo-flow marker state. The newest marker wins; a done
    /// marker recorded after a pending one means the flow already played
    /// out.
    pub async fn photo_flow<M: MemoryRepository>(
        memory: &M,
        user_id: &str,
    ) -> Result<PhotoFlowState> {
        let Some(turn) = memory
            .latest_assistant_with_prefix(
                user_id,
                MemoryLayer::Short,
                &[PHOTO_PENDING_MARKER, PHOTO_DONE_MARKER],
            )
            .await?
        else {
            return Ok(PhotoFlowState::None);
        };

        if turn.content.starts_with(PHOTO_DONE_MARKER) {
            Ok(PhotoFlowState::Done)
        } else {
            Ok(PhotoFlowState::Pending)
        }
    }
}

//! The turn orchestrator: one inbound turn in, one visible reply out.
//!
//! Each turn is resolved against persisted state only (markers in short
//! memory, progress rows, photo rows); nothing is held between turns, so a
//! process restart mid-interview costs nothing. The handling priority is
//! fixed: persist inbound content, client control triggers, the photo
//! sub-flow, the legacy advance trigger, the survey cascade, the pending
//! stimulus, and finally the intro fallback. The oracle is called at most
//! once per logical step.

use std::sync::Arc;

use regex::Regex;
use tracing::{info, warn};

use crate::domain::errors::{TurnError, TurnResult};
use crate::domain::models::protocol::{
    status_token, CAMERA_CAPTURE_TOKEN, AUTO_CONTINUE_TOKEN, PHOTO_DONE_MARKER,
    PHOTO_PENDING_MARKER, PHOTO_PHASE_START_STIMULUS, STIMULUS_PREFIX,
};
use crate::domain::models::{
    MemoryLayer, NewMemoryTurn, OracleConfig, PhotoFlowState, PhotoRole, Speaker,
    StimulusState, SurveyKind, TurnReply, TurnRequest,
};
use crate::domain::ports::{
    AssetStore, ChatTurn, MemoryRepository, Oracle, OracleRequest, PhotoRepository,
    ProgressRepository,
};
use crate::services::catalog::SurveyCatalog;
use crate::services::photo_gate::PhotoGate;
use crate::services::prompts::{build_system, Phase};
use crate::services::sanitize::ReplySanitizer;
use crate::services::scoring::{clamp_and_reverse, ScoreExtractor};
use crate::services::stimulus::StimulusTracker;
use crate::services::triggers::TriggerDetector;

/// Transcript window handed to the oracle.
const SHORT_HISTORY_LIMIT: u32 = 60;
/// How far back to scan for the last posted image.
const RECENT_IMAGE_SCAN: u32 = 30;

// Per-site output budgets; each is additionally capped by the configured
// `oracle.max_tokens`.
const INTRO_MAX_TOKENS: usize = 280;
const SURVEY_MAX_TOKENS: usize = 320;
const PHOTO_KICKOFF_MAX_TOKENS: usize = 380;
const PHOTO_REACTION_MAX_TOKENS: usize = 400;
const COMPLETE_MAX_TOKENS: usize = 280;

pub struct TurnOrchestrator<M, P, F>
where
    M: MemoryRepository,
    P: ProgressRepository,
    F: PhotoRepository,
{
    memory: Arc<M>,
    progress: Arc<P>,
    photos: Arc<F>,
    oracle: Arc<dyn Oracle>,
    assets: Arc<dyn AssetStore>,
    catalog: SurveyCatalog,
    triggers: TriggerDetector,
    sanitizer: ReplySanitizer,
    extractor: ScoreExtractor,
    gate: PhotoGate,
    temperature: f64,
    max_tokens_cap: usize,
    image_markdown: Regex,
}

impl<M, P, F> TurnOrchestrator<M, P, F>
where
    M: MemoryRepository,
    P: ProgressRepository,
    F: PhotoRepository,
{
    pub fn new(
        memory: Arc<M>,
        progress: Arc<P>,
        photos: Arc<F>,
        oracle: Arc<dyn Oracle>,
        assets: Arc<dyn AssetStore>,
        catalog: SurveyCatalog,
        oracle_config: &OracleConfig,
        gate: PhotoGate,
    ) -> Self {
        Self {
            memory,
            progress,
            photos,
            oracle,
            assets,
            catalog,
            triggers: TriggerDetector::new(),
            sanitizer: ReplySanitizer::new(),
            extractor: ScoreExtractor::new(),
            gate,
            temperature: oracle_config.temperature,
            max_tokens_cap: oracle_config.max_tokens,
            image_markdown: Regex::new(r"!\[Image\]\((.+)\)").unwrap(),
        }
    }

    /// Handle one inbound turn end to end.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        request: &TurnRequest,
    ) -> TurnResult<TurnReply> {
        if user_id.trim().is_empty() {
            return Err(TurnError::Unauthorized("missing user id".to_string()));
        }
        if !request.image_refs.is_empty() && request.first_image().is_none() {
            return Err(TurnError::Validation("blank image reference".to_string()));
        }

        // 1) Persist inbound content before any routing.
        let image_url = request.first_image();
        if let Some(url) = image_url {
            self.store_user(user_id, format!("![Image]({url})")).await?;
            self.gate
                .ingest(
                    self.photos.as_ref(),
                    self.assets.as_ref(),
                    user_id,
                    url,
                    PhotoRole::SelfPortrait,
                )
                .await
                .map_err(|e| TurnError::Store(e.to_string()))?;
            self.store_assistant(user_id, PHOTO_PENDING_MARKER).await?;
        }
        if let Some(text) = request.text() {
            self.store_user(user_id, text).await?;
        }

        // 2) Client control triggers.
        if let Some(control) = request.client_control_text.as_deref() {
            if self.triggers.is_camera_capture(control) {
                info!(user_id = %user_id, "camera capture token relayed");
                return Ok(TurnReply::new(CAMERA_CAPTURE_TOKEN));
            }
            if self.triggers.is_photo_phase_start(control) {
                let visible = self.sanitizer.sanitize(control);
                if !visible.is_empty() {
                    self.store_assistant(user_id, &visible).await?;
                }
                let kickoff = self.start_photo_phase(user_id).await?;
                return Ok(TurnReply::new(kickoff));
            }
        }

        // 3) Photo sub-flow.
        if let Some(url) = image_url {
            return self.react_to_upload(user_id, url, request.text()).await;
        }
        let photo_flow = StimulusTracker::photo_flow(self.memory.as_ref(), user_id)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        match photo_flow {
            PhotoFlowState::Pending => {
                return self.resume_pending_photo(user_id, request.text()).await;
            }
            PhotoFlowState::Done if request.text().is_some() => {
                return self.photo_followup(user_id, request.text()).await;
            }
            _ => {}
        }

        // 4) Legacy advance trigger: enter the first survey.
        if let Some(control) = request.client_control_text.as_deref() {
            if self.triggers.is_legacy_advance(control) {
                return self.enter_first_survey(user_id, control).await;
            }
        }

        let stimulus = StimulusTracker::current(self.memory.as_ref(), &self.catalog, user_id)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;

        // 5) Survey cascade: auto-post only engages once the first survey
        // is complete; entry into it happens via the advance trigger alone.
        if self.refresh_completion(user_id, SurveyKind::CASCADE[0]).await? {
            let mut all_complete = true;
            for kind in &SurveyKind::CASCADE[1..] {
                if !self.refresh_completion(user_id, *kind).await? {
                    all_complete = false;
                    if stimulus == StimulusState::None {
                        let position = self.next_position(user_id, *kind).await?;
                        return self.post_item(user_id, *kind, position, true, None).await;
                    }
                    break;
                }
            }
            if all_complete {
                return self.closing_turn(user_id).await;
            }
        }

        // 6) Pending stimulus.
        match stimulus {
            StimulusState::Known { kind, position, text } => {
                return self.continue_survey(user_id, kind, position, &text).await;
            }
            StimulusState::Unknown(text) => {
                warn!(user_id = %user_id, "pending stimulus matches no catalog item");
                let reply = self
                    .call_oracle(
                        user_id,
                        &Phase::Survey(SurveyKind::BigFive),
                        Some(&text),
                        vec![ChatTurn::user(AUTO_CONTINUE_TOKEN)],
                        SURVEY_MAX_TOKENS,
                    )
                    .await?;
                return Ok(TurnReply::new(self.store_and_render(user_id, &reply).await?));
            }
            StimulusState::None => {}
        }

        // 7) Intro fallback.
        self.intro_turn(user_id, request.text()).await
    }

    // ---- step handlers -------------------------------------------------

    /// One survey exchange: oracle under the survey framing, score from the
    /// raw reply, slot write, then advance.
    async fn continue_survey(
        &self,
        user_id: &str,
        kind: SurveyKind,
        position: u32,
        stimulus_text: &str,
    ) -> TurnResult<TurnReply> {
        let raw = self
            .call_oracle(
                user_id,
                &Phase::Survey(kind),
                Some(stimulus_text),
                vec![ChatTurn::user(AUTO_CONTINUE_TOKEN)],
                SURVEY_MAX_TOKENS,
            )
            .await?;
        let score = self.extractor.extract(&raw);
        let visible = self.store_and_render(user_id, &raw).await?;

        let Some(score) = score else {
            // Position held; the same stimulus continues next turn.
            return Ok(TurnReply::new(visible));
        };

        let definition = self.catalog.definition(kind);
        let item = definition
            .item(position)
            .ok_or_else(|| TurnError::Catalog(format!("{kind}: no item at {position}")))?;
        let derived = clamp_and_reverse(kind, item, score);

        self.progress
            .ensure_row(user_id, kind)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let record = self
            .progress
            .get_row(user_id, definition)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let already_filled = record
            .as_ref()
            .is_some_and(|r| r.slot(&item.slot_key).is_some());
        if !already_filled {
            self.progress
                .write_slot(user_id, kind, &item.slot_key, derived)
                .await
                .map_err(|e| TurnError::Store(e.to_string()))?;
            info!(
                user_id = %user_id,
                survey = %kind,
                position,
                score = derived,
                "slot written"
            );
        }

        if definition.is_last(position) {
            self.progress
                .mark_complete(user_id, kind)
                .await
                .map_err(|e| TurnError::Store(e.to_string()))?;
            info!(user_id = %user_id, survey = %kind, "survey complete");

            let Some(next_kind) = cascade_successor(kind) else {
                // Final survey: fixed closing note, no oracle call.
                let note = transition_note(kind);
                self.store_assistant(user_id, note).await?;
                return Ok(TurnReply::new(note));
            };
            self.store_assistant(user_id, transition_note(kind)).await?;
            let next_position = self.next_position(user_id, next_kind).await?;
            return self.post_item(user_id, next_kind, next_position, true, None).await;
        }

        self.post_item(user_id, kind, position + 1, true, None).await
    }

    /// Advance-trigger entry: store the enthusiasm text and post the first
    /// survey's next unanswered item, prepending the enthusiasm.
    async fn enter_first_survey(&self, user_id: &str, control: &str) -> TurnResult<TurnReply> {
        let enthusiasm = self.sanitizer.sanitize(control);
        if !enthusiasm.is_empty() {
            self.store_assistant(user_id, &enthusiasm).await?;
        }
        let kind = SurveyKind::CASCADE[0];
        let position = self.next_position(user_id, kind).await?;
        let prefix = (!enthusiasm.is_empty()).then_some(enthusiasm);
        // The entry call carries no continuation token; the enthusiasm text
        // is the user-facing bridge.
        self.post_item(user_id, kind, position, false, prefix).await
    }

    /// Immediate reaction to an uploaded image: block on moderation, then
    /// one oracle call primed with the real status.
    async fn react_to_upload(
        &self,
        user_id: &str,
        image_url: &str,
        user_text: Option<&str>,
    ) -> TurnResult<TurnReply> {
        let status = self
            .gate
            .await_terminal_status(self.photos.as_ref(), user_id)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let tag = status_token(status);
        info!(user_id = %user_id, status = tag, "photo moderation resolved");

        let content = fold_photo_content(Some(image_url), user_text, Some(tag));
        let raw = self
            .call_oracle(
                user_id,
                &Phase::PhotoUser,
                None,
                vec![ChatTurn::user(content)],
                PHOTO_REACTION_MAX_TOKENS,
            )
            .await?;
        let visible = self.store_and_render(user_id, &raw).await?;
        self.store_assistant(user_id, PHOTO_DONE_MARKER).await?;
        Ok(TurnReply::new(visible))
    }

    /// A pending photo flow with no new image this turn: block on the
    /// status, then react, folding the user's text when present.
    async fn resume_pending_photo(
        &self,
        user_id: &str,
        user_text: Option<&str>,
    ) -> TurnResult<TurnReply> {
        let status = self
            .gate
            .await_terminal_status(self.photos.as_ref(), user_id)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let tag = status_token(status);

        let content = if user_text.is_some() {
            let last_image = self.last_user_image(user_id).await?;
            fold_photo_content(last_image.as_deref(), user_text, Some(tag))
        } else {
            tag.to_string()
        };
        let raw = self
            .call_oracle(
                user_id,
                &Phase::PhotoUser,
                None,
                vec![ChatTurn::user(content)],
                PHOTO_REACTION_MAX_TOKENS,
            )
            .await?;
        let visible = self.store_and_render(user_id, &raw).await?;
        self.store_assistant(user_id, PHOTO_DONE_MARKER).await?;
        Ok(TurnReply::new(visible))
    }

    /// Conversation after the photo flow finished: fold the last known
    /// image with the new text, no blocking.
    async fn photo_followup(
        &self,
        user_id: &str,
        user_text: Option<&str>,
    ) -> TurnResult<TurnReply> {
        let last_image = self.last_user_image(user_id).await?;
        let content = fold_photo_content(last_image.as_deref(), user_text, None);
        let raw = self
            .call_oracle(
                user_id,
                &Phase::PhotoUser,
                None,
                vec![ChatTurn::user(content)],
                PHOTO_REACTION_MAX_TOKENS,
            )
            .await?;
        let visible = self.store_and_render(user_id, &raw).await?;
        Ok(TurnReply::new(visible))
    }

    /// Kick off the photo phase: record its stimulus marker and make the
    /// opening oracle call.
    async fn start_photo_phase(&self, user_id: &str) -> TurnResult<String> {
        self.store_assistant(
            user_id,
            format!("{STIMULUS_PREFIX}\n{PHOTO_PHASE_START_STIMULUS}"),
        )
        .await?;
        let raw = self
            .call_oracle(
                user_id,
                &Phase::PhotoUser,
                None,
                vec![ChatTurn::user(AUTO_CONTINUE_TOKEN)],
                PHOTO_KICKOFF_MAX_TOKENS,
            )
            .await?;
        self.store_and_render(user_id, &raw).await
    }

    /// All surveys complete: one closing call under the complete framing.
    async fn closing_turn(&self, user_id: &str) -> TurnResult<TurnReply> {
        let raw = self
            .call_oracle(
                user_id,
                &Phase::Complete,
                None,
                vec![ChatTurn::user(AUTO_CONTINUE_TOKEN)],
                COMPLETE_MAX_TOKENS,
            )
            .await?;
        Ok(TurnReply::new(self.store_and_render(user_id, &raw).await?))
    }

    /// Intro fallback, honoring triggers the oracle itself may emit.
    async fn intro_turn(&self, user_id: &str, user_text: Option<&str>) -> TurnResult<TurnReply> {
        let tail = user_text.unwrap_or(AUTO_CONTINUE_TOKEN).to_string();
        let raw = self
            .call_oracle(
                user_id,
                &Phase::Intro,
                None,
                vec![ChatTurn::user(tail)],
                INTRO_MAX_TOKENS,
            )
            .await?;

        if self.triggers.is_camera_capture(&raw) {
            let visible = self.sanitizer.sanitize(&raw);
            if !visible.is_empty() {
                self.store_assistant(user_id, &visible).await?;
            }
            let out = if visible.is_empty() {
                CAMERA_CAPTURE_TOKEN.to_string()
            } else {
                format!("{visible}\n\n{CAMERA_CAPTURE_TOKEN}")
            };
            return Ok(TurnReply::new(out));
        }

        if self.triggers.is_photo_phase_start(&raw) {
            let visible = self.sanitizer.sanitize(&raw);
            if !visible.is_empty() {
                self.store_assistant(user_id, &visible).await?;
            }
            let kickoff = self.start_photo_phase(user_id).await?;
            let out = if visible.is_empty() {
                kickoff
            } else {
                format!("{visible}\n\n{kickoff}")
            };
            return Ok(TurnReply::new(out));
        }

        Ok(TurnReply::new(self.store_and_render(user_id, &raw).await?))
    }

    // ---- shared plumbing -----------------------------------------------

    /// Post one survey item: record its stimulus marker, then ask the
    /// oracle to phrase it conversationally.
    async fn post_item(
        &self,
        user_id: &str,
        kind: SurveyKind,
        position: u32,
        auto_continue: bool,
        prefix: Option<String>,
    ) -> TurnResult<TurnReply> {
        let item = self
            .catalog
            .item(kind, position)
            .ok_or_else(|| TurnError::Catalog(format!("{kind}: no item at {position}")))?;
        let text = item.prompt_text.clone();
        self.store_assistant(user_id, format!("{STIMULUS_PREFIX}\n{text}")).await?;
        info!(user_id = %user_id, survey = %kind, position, "stimulus posted");

        let tail = if auto_continue {
            vec![ChatTurn::user(AUTO_CONTINUE_TOKEN)]
        } else {
            Vec::new()
        };
        let raw = self
            .call_oracle(user_id, &Phase::Survey(kind), Some(&text), tail, SURVEY_MAX_TOKENS)
            .await?;
        let visible = self.store_and_render(user_id, &raw).await?;
        let out = match prefix {
            Some(p) => format!("{p}\n\n{visible}"),
            None => visible,
        };
        Ok(TurnReply::new(out))
    }

    /// Next unanswered position for a survey, ensuring its row exists.
    /// A fully-filled row yields the sentinel past the total; that wraps
    /// back to the first item rather than running off the catalog.
    async fn next_position(&self, user_id: &str, kind: SurveyKind) -> TurnResult<u32> {
        self.progress
            .ensure_row(user_id, kind)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let definition = self.catalog.definition(kind);
        let position = self
            .progress
            .get_row(user_id, definition)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?
            .map_or(1, |r| r.first_empty_position(definition));
        if position > definition.total_items {
            warn!(user_id = %user_id, survey = %kind, "all slots filled, wrapping to first item");
            return Ok(1);
        }
        Ok(position)
    }

    /// Refresh a survey's completion flag from its slot contents. Ensures
    /// the row exists; returns whether the survey is complete.
    async fn refresh_completion(&self, user_id: &str, kind: SurveyKind) -> TurnResult<bool> {
        self.progress
            .ensure_row(user_id, kind)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let definition = self.catalog.definition(kind);
        let Some(record) = self
            .progress
            .get_row(user_id, definition)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?
        else {
            return Ok(false);
        };
        if record.is_complete {
            return Ok(true);
        }
        if record.is_fully_filled(definition) {
            self.progress
                .mark_complete(user_id, kind)
                .await
                .map_err(|e| TurnError::Store(e.to_string()))?;
            return Ok(true);
        }
        Ok(false)
    }

    /// One oracle call: system framing, bounded short history, optional
    /// trailing turns.
    async fn call_oracle(
        &self,
        user_id: &str,
        phase: &Phase,
        stimulus: Option<&str>,
        tail: Vec<ChatTurn>,
        max_tokens: usize,
    ) -> TurnResult<String> {
        let history = self
            .memory
            .history_ascending(user_id, MemoryLayer::Short, Some(SHORT_HISTORY_LIMIT))
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        let mut transcript: Vec<ChatTurn> = history
            .into_iter()
            .map(|t| ChatTurn { speaker: t.speaker, text: t.content })
            .collect();
        transcript.extend(tail);

        let request = OracleRequest::new(
            build_system(phase, stimulus),
            transcript,
            self.temperature,
            max_tokens.min(self.max_tokens_cap),
        );
        self.oracle
            .complete(request)
            .await
            .map_err(|e| TurnError::Oracle(e.to_string()))
    }

    /// Sanitize a raw oracle reply, store the visible form when non-empty,
    /// and return what the caller should emit: the sanitized text, or the
    /// raw reply when sanitization leaves nothing.
    async fn store_and_render(&self, user_id: &str, raw: &str) -> TurnResult<String> {
        let visible = self.sanitizer.sanitize(raw);
        if visible.is_empty() {
            return Ok(raw.trim().to_string());
        }
        self.store_assistant(user_id, &visible).await?;
        Ok(visible)
    }

    /// Most recent image markdown posted by the user, if any.
    async fn last_user_image(&self, user_id: &str) -> TurnResult<Option<String>> {
        let recent = self
            .memory
            .recent_user_turns(user_id, MemoryLayer::Short, RECENT_IMAGE_SCAN)
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        Ok(recent.iter().find_map(|t| {
            self.image_markdown
                .captures(&t.content)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        }))
    }

    async fn store_user(&self, user_id: &str, content: impl Into<String>) -> TurnResult<()> {
        self.memory
            .append(NewMemoryTurn::short(user_id, Speaker::User, content))
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        Ok(())
    }

    async fn store_assistant(&self, user_id: &str, content: impl Into<String>) -> TurnResult<()> {
        self.memory
            .append(NewMemoryTurn::short(user_id, Speaker::Assistant, content))
            .await
            .map_err(|e| TurnError::Store(e.to_string()))?;
        Ok(())
    }
}

/// The survey after `kind` in cascade order, or `None` for the last.
fn cascade_successor(kind: SurveyKind) -> Option<SurveyKind> {
    let idx = SurveyKind::CASCADE.iter().position(|k| *k == kind)?;
    SurveyKind::CASCADE.get(idx + 1).copied()
}

/// Assistant note stored when a survey finishes. The final survey's note is
/// also the turn's reply.
fn transition_note(kind: SurveyKind) -> &'static str {
    match kind {
        SurveyKind::BigFive => "✅ First chapter finished. Moving on.",
        SurveyKind::Iri => "✅ Second chapter finished. Moving on.",
        SurveyKind::EcrR => "✅ Third chapter finished. Moving on.",
        SurveyKind::Pvq40 => "✅ All chapters finished. Thank you for taking part.",
    }
}

/// Fold the photo-phase user content into one text message: image markdown
/// first, then the user's text, then the status or continuation token.
fn fold_photo_content(
    image_url: Option<&str>,
    user_text: Option<&str>,
    status_tag: Option<&str>,
) -> String {
    let mut parts = Vec::new();
    if let Some(url) = image_url {
        parts.push(format!("![Image]({url})"));
    }
    if let Some(text) = user_text {
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text.to_string());
        }
    }
    match status_tag {
        Some(tag) => parts.push(tag.to_string()),
        None if parts.is_empty() => parts.push(AUTO_CONTINUE_TOKEN.to_string()),
        None => {}
    }
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_successor_walks_in_order_and_ends() {
        assert_eq!(cascade_successor(SurveyKind::BigFive), Some(SurveyKind::Iri));
        assert_eq!(cascade_successor(SurveyKind::Iri), Some(SurveyKind::EcrR));
        assert_eq!(cascade_successor(SurveyKind::EcrR), Some(SurveyKind::Pvq40));
        assert_eq!(cascade_successor(SurveyKind::Pvq40), None);
    }

    #[test]
    fn fold_orders_image_text_then_tag() {
        let folded = fold_photo_content(
            Some("https://x/img.png"),
            Some("here you go"),
            Some("[PHOTO_STATUS_CONFIRMED]"),
        );
        assert_eq!(
            folded,
            "![Image](https://x/img.png)\n\nhere you go\n\n[PHOTO_STATUS_CONFIRMED]"
        );
    }

    #[test]
    fn fold_with_nothing_yields_continuation_token() {
        assert_eq!(fold_photo_content(None, None, None), AUTO_CONTINUE_TOKEN);
    }
}

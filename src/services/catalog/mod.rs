//! Survey catalog: the four question banks, validated once at startup.
//!
//! Item text is the contract between posting and matching: an assistant turn
//! stores the exact statement after the stimulus prefix, and a later turn is
//! resolved back to `(kind, position)` by exact string equality against this
//! catalog. Any drift in phrasing breaks resume, so the banks are `const` and
//! validation aborts startup rather than limping along.

mod big_five;
mod ecr_r;
mod iri;
mod pvq_40;

use crate::domain::errors::{TurnError, TurnResult};
use crate::domain::models::{SurveyDefinition, SurveyItem, SurveyKind};

/// All four survey definitions, in cascade order.
pub struct SurveyCatalog {
    definitions: [SurveyDefinition; 4],
}

impl SurveyCatalog {
    /// Build and validate every definition. Fails with
    /// [`TurnError::Catalog`] if any bank violates its invariants.
    pub fn load() -> TurnResult<Self> {
        let definitions = [
            SurveyDefinition::from_items(SurveyKind::BigFive, big_five::ITEMS),
            SurveyDefinition::from_items(SurveyKind::Iri, iri::ITEMS),
            SurveyDefinition::from_items(SurveyKind::EcrR, ecr_r::ITEMS),
            SurveyDefinition::from_items(SurveyKind::Pvq40, pvq_40::ITEMS),
        ];
        for def in &definitions {
            def.validate().map_err(TurnError::Catalog)?;
        }
        Ok(Self { definitions })
    }

    /// Definition for one survey kind.
    pub fn definition(&self, kind: SurveyKind) -> &SurveyDefinition {
        let idx = SurveyKind::CASCADE
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.definitions[idx]
    }

    /// All definitions in cascade order.
    pub fn definitions(&self) -> &[SurveyDefinition] {
        &self.definitions
    }

    /// Item at a 1-based position within a survey.
    pub fn item(&self, kind: SurveyKind, position: u32) -> Option<&SurveyItem> {
        self.definition(kind).item(position)
    }

    /// Total item count for a survey.
    pub fn total_of(&self, kind: SurveyKind) -> u32 {
        self.definition(kind).total_items
    }

    /// Resolve stored stimulus text back to its catalog coordinates by exact
    /// equality, searching surveys in cascade order; first match wins.
    pub fn match_stimulus(&self, text: &str) -> Option<(SurveyKind, &SurveyItem)> {
        for def in &self.definitions {
            if let Some(item) = def.items.iter().find(|i| i.prompt_text == text) {
                return Some((def.kind, item));
            }
        }
        None
    }
}

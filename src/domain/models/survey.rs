//! Survey catalog domain types.
//!
//! A survey is an immutable, ordered set of items loaded once at startup.
//! Positions are contiguous from 1 and slot keys are unique; both are
//! validated at load time because every later component (progress rows,
//! stimulus matching, score writing) assumes they hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of surveys in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyKind {
    /// BFI-18 personality inventory (Likert 1-5).
    BigFive,
    /// Interpersonal Reactivity Index, 28 items (Likert 1-5).
    Iri,
    /// Experiences in Close Relationships-Revised, 36 items (Likert 1-7).
    EcrR,
    /// Portrait Values Questionnaire, 40 items (Likert 1-6).
    Pvq40,
}

impl SurveyKind {
    /// Cascade order. Surveys are always advanced in this order, and
    /// stimulus matching uses the same priority.
    pub const CASCADE: [SurveyKind; 4] = [
        SurveyKind::BigFive,
        SurveyKind::Iri,
        SurveyKind::EcrR,
        SurveyKind::Pvq40,
    ];

    /// Upper bound of the Likert scale for this survey.
    pub fn scale_max(self) -> i32 {
        match self {
            SurveyKind::BigFive | SurveyKind::Iri => 5,
            SurveyKind::EcrR => 7,
            SurveyKind::Pvq40 => 6,
        }
    }

    /// Stable identifier used in storage and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            SurveyKind::BigFive => "big_five",
            SurveyKind::Iri => "iri",
            SurveyKind::EcrR => "ecr_r",
            SurveyKind::Pvq40 => "pvq_40",
        }
    }
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big_five" => Ok(SurveyKind::BigFive),
            "iri" => Ok(SurveyKind::Iri),
            "ecr_r" => Ok(SurveyKind::EcrR),
            "pvq_40" => Ok(SurveyKind::Pvq40),
            other => Err(format!("unknown survey kind: {other}")),
        }
    }
}

/// One survey item. `prompt_text` is the exact published statement; it is
/// posted verbatim after the stimulus prefix so that later turns can be
/// matched back to the catalog by string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyItem {
    /// 1-based position within the survey.
    pub position: u32,
    /// Storage slot key ("q1".."qN").
    pub slot_key: String,
    /// Exact statement text.
    pub prompt_text: String,
    /// Whether the item is reverse-keyed.
    pub is_reverse_scored: bool,
}

/// An immutable, validated question set for one survey kind.
#[derive(Debug, Clone)]
pub struct SurveyDefinition {
    pub kind: SurveyKind,
    pub total_items: u32,
    pub items: Vec<SurveyItem>,
}

impl SurveyDefinition {
    /// Build a definition from raw item tuples `(text, is_reverse_scored)`,
    /// assigning contiguous positions and `qN` slot keys.
    pub fn from_items(kind: SurveyKind, raw: &[(&str, bool)]) -> Self {
        let items = raw
            .iter()
            .enumerate()
            .map(|(i, (text, reversed))| {
                let position = u32::try_from(i).unwrap_or(u32::MAX) + 1;
                SurveyItem {
                    position,
                    slot_key: format!("q{position}"),
                    prompt_text: (*text).to_string(),
                    is_reverse_scored: *reversed,
                }
            })
            .collect::<Vec<_>>();
        let total_items = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self { kind, total_items, items }
    }

    /// Validate the load-time invariants: contiguous positions from 1,
    /// unique slot keys, non-empty prompt text.
    pub fn validate(&self) -> Result<(), String> {
        if self.items.len() != self.total_items as usize {
            return Err(format!(
                "{}: declared {} items, found {}",
                self.kind,
                self.total_items,
                self.items.len()
            ));
        }
        let mut seen_keys = std::collections::HashSet::new();
        for (i, item) in self.items.iter().enumerate() {
            let expected = u32::try_from(i).unwrap_or(u32::MAX) + 1;
            if item.position != expected {
                return Err(format!(
                    "{}: non-contiguous position {} at offset {i}",
                    self.kind, item.position
                ));
            }
            if item.prompt_text.trim().is_empty() {
                return Err(format!("{}: empty prompt text at position {expected}", self.kind));
            }
            if !seen_keys.insert(item.slot_key.as_str()) {
                return Err(format!(
                    "{}: duplicate slot key {} at position {expected}",
                    self.kind, item.slot_key
                ));
            }
        }
        Ok(())
    }

    /// Item at a 1-based position, or `None` outside `[1, total]`.
    pub fn item(&self, position: u32) -> Option<&SurveyItem> {
        if position == 0 || position > self.total_items {
            return None;
        }
        self.items.get(position as usize - 1)
    }

    /// Whether `position` is the survey's final item.
    pub fn is_last(&self, position: u32) -> bool {
        position == self.total_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_def() -> SurveyDefinition {
        SurveyDefinition::from_items(
            SurveyKind::BigFive,
            &[("first item.", false), ("second item.", true), ("third item.", false)],
        )
    }

    #[test]
    fn from_items_assigns_contiguous_positions_and_keys() {
        let def = small_def();
        assert_eq!(def.total_items, 3);
        assert_eq!(def.items[1].position, 2);
        assert_eq!(def.items[1].slot_key, "q2");
        assert!(def.items[1].is_reverse_scored);
        def.validate().expect("valid definition");
    }

    #[test]
    fn validate_rejects_duplicate_slot_keys() {
        let mut def = small_def();
        def.items[2].slot_key = "q1".to_string();
        assert!(def.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_contiguous_positions() {
        let mut def = small_def();
        def.items[2].position = 5;
        assert!(def.validate().is_err());
    }

    #[test]
    fn item_lookup_is_one_based_and_bounded() {
        let def = small_def();
        assert!(def.item(0).is_none());
        assert_eq!(def.item(1).map(|i| i.position), Some(1));
        assert_eq!(def.item(3).map(|i| i.position), Some(3));
        assert!(def.item(4).is_none());
    }

    #[test]
    fn survey_kind_round_trips_through_str() {
        for kind in SurveyKind::CASCADE {
            assert_eq!(kind.as_str().parse::<SurveyKind>(), Ok(kind));
        }
    }
}

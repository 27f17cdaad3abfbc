//! Per-user survey progress.

use std::collections::HashMap;

use super::survey::SurveyDefinition;

/// Materialized progress for one `(user, survey)` pair.
///
/// Every catalog slot is present in `slots`; unanswered slots hold `None`.
/// The record is created lazily on first access and never deleted. Exactly
/// one slot is written per derived score, and `is_complete` is set once
/// after all slots are filled.
#[derive(Debug, Clone)]
pub struct ProgressRecord {
    pub user_id: String,
    pub is_complete: bool,
    /// slot key -> derived score (already clamped and reverse-keyed).
    pub slots: HashMap<String, Option<i32>>,
}

impl ProgressRecord {
    /// An empty record with one `None` slot per catalog item.
    pub fn empty(user_id: &str, definition: &SurveyDefinition) -> Self {
        let slots = definition
            .items
            .iter()
            .map(|item| (item.slot_key.clone(), None))
            .collect();
        Self { user_id: user_id.to_string(), is_complete: false, slots }
    }

    /// Score stored for `slot_key`, if any.
    pub fn slot(&self, slot_key: &str) -> Option<i32> {
        self.slots.get(slot_key).copied().flatten()
    }

    /// Smallest position whose slot is still empty, walking the catalog in
    /// order. Returns `total + 1` as the complete/wrap sentinel when every
    /// slot is filled.
    pub fn first_empty_position(&self, definition: &SurveyDefinition) -> u32 {
        for item in &definition.items {
            if self.slot(&item.slot_key).is_none() {
                return item.position;
            }
        }
        definition.total_items + 1
    }

    /// Whether every catalog slot holds a score.
    pub fn is_fully_filled(&self, definition: &SurveyDefinition) -> bool {
        definition
            .items
            .iter()
            .all(|item| self.slot(&item.slot_key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::survey::SurveyKind;

    fn def() -> SurveyDefinition {
        SurveyDefinition::from_items(
            SurveyKind::Iri,
            &[("a.", false), ("b.", false), ("c.", false)],
        )
    }

    #[test]
    fn first_empty_walks_in_position_order() {
        let def = def();
        let mut record = ProgressRecord::empty("u1", &def);
        assert_eq!(record.first_empty_position(&def), 1);

        record.slots.insert("q1".to_string(), Some(3));
        assert_eq!(record.first_empty_position(&def), 2);

        // A hole before a filled slot still wins.
        record.slots.insert("q3".to_string(), Some(2));
        assert_eq!(record.first_empty_position(&def), 2);
    }

    #[test]
    fn sentinel_equals_total_plus_one_iff_fully_filled() {
        let def = def();
        let mut record = ProgressRecord::empty("u1", &def);
        for key in ["q1", "q2", "q3"] {
            assert!(!record.is_fully_filled(&def));
            record.slots.insert(key.to_string(), Some(1));
        }
        assert!(record.is_fully_filled(&def));
        assert_eq!(record.first_empty_position(&def), 4);
    }
}

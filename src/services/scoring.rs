//! Score extraction and normalization.
//!
//! Scores ride inside oracle replies as `[[SCORE=n]]` or a loose
//! `"score": n` field. Extraction runs against the RAW reply, before the
//! sanitizer strips those same shapes, and takes the LAST occurrence so a
//! reply that quotes an earlier score and then corrects itself lands on the
//! correction. Absence is not an error; the turn proceeds without a write.

use regex::Regex;

use crate::domain::models::{SurveyItem, SurveyKind};

pub struct ScoreExtractor {
    pattern: Regex,
}

impl ScoreExtractor {
    pub fn new() -> Self {
        Self {
            // 1-7 covers every scale in use; per-survey bounds apply later.
            pattern: Regex::new(r#"(?i)\[\[\s*SCORE\s*=\s*([1-7])\s*\]\]|["']?score["']?\s*:\s*([1-7])"#)
                .unwrap(),
        }
    }

    /// Last score token in `raw`, if any.
    pub fn extract(&self, raw: &str) -> Option<i32> {
        self.pattern
            .captures_iter(raw)
            .filter_map(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .and_then(|m| m.as_str().parse::<i32>().ok())
            })
            .last()
    }
}

impl Default for ScoreExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp an extracted score to the survey's scale and apply reverse keying.
///
/// Reverse keying maps `v` to `scale_max + 1 - v`, so applying it twice is
/// the identity.
pub fn clamp_and_reverse(kind: SurveyKind, item: &SurveyItem, raw_score: i32) -> i32 {
    let max = kind.scale_max();
    let clamped = raw_score.clamp(1, max);
    if item.is_reverse_scored {
        max + 1 - clamped
    } else {
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(reversed: bool) -> SurveyItem {
        SurveyItem {
            position: 1,
            slot_key: "q1".to_string(),
            prompt_text: "statement.".to_string(),
            is_reverse_scored: reversed,
        }
    }

    #[test]
    fn extracts_bracketed_and_field_forms() {
        let x = ScoreExtractor::new();
        assert_eq!(x.extract("great! [[SCORE=5]]"), Some(5));
        assert_eq!(x.extract("[[ score = 3 ]]"), Some(3));
        assert_eq!(x.extract(r#"{"score": 6}"#), Some(6));
        assert_eq!(x.extract("score: 2"), Some(2));
        assert_eq!(x.extract("no tokens here"), None);
    }

    #[test]
    fn last_occurrence_wins() {
        let x = ScoreExtractor::new();
        assert_eq!(x.extract("earlier you said score: 2, but [[SCORE=5]]"), Some(5));
    }

    #[test]
    fn out_of_range_digits_are_not_scores() {
        let x = ScoreExtractor::new();
        assert_eq!(x.extract("score: 9"), None);
        assert_eq!(x.extract("[[SCORE=0]]"), None);
    }

    #[test]
    fn clamp_bounds_to_the_survey_scale() {
        assert_eq!(clamp_and_reverse(SurveyKind::BigFive, &item(false), 7), 5);
        assert_eq!(clamp_and_reverse(SurveyKind::Pvq40, &item(false), 7), 6);
        assert_eq!(clamp_and_reverse(SurveyKind::EcrR, &item(false), 7), 7);
    }

    #[test]
    fn reverse_keying_flips_within_scale() {
        // 1-5 scale: 2 -> 4.
        assert_eq!(clamp_and_reverse(SurveyKind::Iri, &item(true), 2), 4);
        // 1-7 scale: 7 -> 1.
        assert_eq!(clamp_and_reverse(SurveyKind::EcrR, &item(true), 7), 1);
    }

    #[test]
    fn double_reversal_is_identity() {
        for v in 1..=7 {
            let once = clamp_and_reverse(SurveyKind::EcrR, &item(true), v);
            let twice = clamp_and_reverse(SurveyKind::EcrR, &item(true), once);
            assert_eq!(twice, v);
        }
    }
}

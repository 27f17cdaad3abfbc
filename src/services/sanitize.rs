//! Outbound reply sanitizer.
//!
//! Oracle replies may carry machine artifacts the user must never see: code
//! fences, control-token JSON (including shapes only older builds emit),
//! score annotations, and bare protocol marker lines. Scrubbing happens on a
//! copy; score extraction always runs against the raw reply first.

use regex::Regex;

pub struct ReplySanitizer {
    json_fence: Regex,
    any_fence: Regex,
    trigger_objects: Vec<Regex>,
    score_object: Regex,
    score_field: Regex,
    score_token: Regex,
    marker_lines: Vec<Regex>,
}

impl ReplySanitizer {
    pub fn new() -> Self {
        let trigger_objects = [
            r#"(?i)\{\s*"?trigger_orchestrator"?\s*:\s*true\s*\}"#,
            r#"(?i)\{\s*"?trigger"?\s*:\s*"TriggerPhotoUserTrue"\s*\}"#,
            // Emitted by an earlier client generation; still scrubbed.
            r#"(?i)\{\s*"?trigger"?\s*:\s*"TriggerUserTrue"\s*\}"#,
            r#"(?i)\{\s*"?trigger"?\s*:\s*"FaceScannerTrigger"\s*\}"#,
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        let marker_lines = [
            r"(?im)^\s*\[STIMULUS\]\s*$",
            r"(?im)^\s*\[SYSTEM\]\s*$",
            r"(?im)^\s*\[PHOTO_PENDING\]\s*$",
            r"(?im)^\s*\[PHOTO_DONE\]\s*$",
            r"(?im)^\s*\[AUTO_CONTINUE\]\s*$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            json_fence: Regex::new(r"(?is)```json.*?```").unwrap(),
            any_fence: Regex::new(r"(?is)```.*?```").unwrap(),
            trigger_objects,
            score_object: Regex::new(r#"(?i)\{\s*"?score"?\s*:\s*\d+\s*\}"#).unwrap(),
            score_field: Regex::new(r#"(?i)["']?score["']?\s*[:=]\s*\d+"#).unwrap(),
            score_token: Regex::new(r"(?i)\[\[\s*SCORE\s*=\s*\d+\s*\]\]").unwrap(),
            marker_lines,
        }
    }

    /// Strip all machine artifacts and trim surrounding whitespace.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut out = self.json_fence.replace_all(raw, "").to_string();
        out = self.any_fence.replace_all(&out, "").to_string();
        for re in &self.trigger_objects {
            out = re.replace_all(&out, "").to_string();
        }
        out = self.score_object.replace_all(&out, "").to_string();
        out = self.score_field.replace_all(&out, "").to_string();
        out = self.score_token.replace_all(&out, "").to_string();
        for re in &self.marker_lines {
            out = re.replace_all(&out, "").to_string();
        }
        out.trim().to_string()
    }
}

impl Default for ReplySanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_triggers_and_score_artifacts() {
        let s = ReplySanitizer::new();
        let raw = concat!(
            "Thanks for sharing!\n",
            "```json\n{\"trigger_orchestrator\": true}\n```\n",
            "{\"score\": 4}\n",
            "[[SCORE=4]]\n",
            "On to the next one."
        );
        let clean = s.sanitize(raw);
        assert!(clean.starts_with("Thanks for sharing!"));
        assert!(clean.ends_with("On to the next one."));
        assert!(!clean.contains("score"));
        assert!(!clean.contains("SCORE"));
        assert!(!clean.contains("trigger"));
    }

    #[test]
    fn strips_legacy_trigger_shape() {
        let s = ReplySanitizer::new();
        let clean = s.sanitize(r#"Noted. {"trigger": "TriggerUserTrue"} Moving on."#);
        assert_eq!(clean, "Noted.  Moving on.");
    }

    #[test]
    fn removes_only_whole_marker_lines() {
        let s = ReplySanitizer::new();
        let raw = "[STIMULUS]\nA real sentence with [STIMULUS] inline.\n[PHOTO_DONE]";
        let clean = s.sanitize(raw);
        assert_eq!(clean, "A real sentence with [STIMULUS] inline.");
    }

    #[test]
    fn plain_replies_pass_through_trimmed() {
        let s = ReplySanitizer::new();
        assert_eq!(s.sanitize("  Just a normal answer.  "), "Just a normal answer.");
    }
}

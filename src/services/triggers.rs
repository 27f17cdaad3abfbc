//! Client control-token detection.
//!
//! Clients and older builds emit small JSON fragments inside otherwise
//! free-form text to drive phase changes. Detection is substring-based and
//! case-insensitive, tolerant of whitespace inside the fragment, because the
//! fragments frequently arrive wrapped in prose or code fences.

use regex::Regex;

/// Precompiled matchers for the three inbound control shapes.
pub struct TriggerDetector {
    legacy_advance: Regex,
    photo_phase_start: Regex,
    camera_capture: Regex,
}

impl TriggerDetector {
    pub fn new() -> Self {
        Self {
            // Older clients advance the cascade with a bare flag.
            legacy_advance: Regex::new(r#"(?i)"trigger_orchestrator"\s*:\s*true"#).unwrap(),
            // Start of the photo phase, sent as a standalone object.
            photo_phase_start: Regex::new(r#"(?i)\{\s*"trigger"\s*:\s*"TriggerPhotoUserTrue"\s*\}"#)
                .unwrap(),
            // Camera hand-off token, relayed to the client verbatim.
            camera_capture: Regex::new(r#"(?i)"trigger"\s*:\s*"FaceScannerTrigger""#).unwrap(),
        }
    }

    /// Legacy cascade-advance flag anywhere in the text.
    pub fn is_legacy_advance(&self, text: &str) -> bool {
        self.legacy_advance.is_match(text)
    }

    /// Photo-phase start object anywhere in the text.
    pub fn is_photo_phase_start(&self, text: &str) -> bool {
        self.photo_phase_start.is_match(text)
    }

    /// Camera capture token anywhere in the text.
    pub fn is_camera_capture(&self, text: &str) -> bool {
        self.camera_capture.is_match(text)
    }
}

impl Default for TriggerDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_advance_tolerates_case_and_whitespace() {
        let d = TriggerDetector::new();
        assert!(d.is_legacy_advance(r#"{"TRIGGER_ORCHESTRATOR" : TRUE}"#));
        assert!(d.is_legacy_advance(r#"ok, let's go {"trigger_orchestrator":true}"#));
        assert!(!d.is_legacy_advance(r#"{"trigger_orchestrator": false}"#));
    }

    #[test]
    fn photo_phase_start_requires_the_full_object() {
        let d = TriggerDetector::new();
        assert!(d.is_photo_phase_start(r#"{ "trigger" : "TriggerPhotoUserTrue" }"#));
        assert!(!d.is_photo_phase_start(r#""trigger": "TriggerPhotoUserTrue", "extra": 1"#));
    }

    #[test]
    fn camera_capture_matches_inside_larger_payloads() {
        let d = TriggerDetector::new();
        assert!(d.is_camera_capture(r#"{"trigger":"FaceScannerTrigger"}"#));
        assert!(d.is_camera_capture(r#"{"trigger": "facescannertrigger", "ts": 9}"#));
        assert!(!d.is_camera_capture("face scanner trigger"));
    }
}

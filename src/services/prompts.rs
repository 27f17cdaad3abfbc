//! System framing handed to the oracle, per phase.
//!
//! The framing is assembled from fixed sections plus, for survey phases, a
//! wrapper around the active stimulus. Section text is user-language content;
//! none of it leaks storage or orchestration vocabulary to the user.

use std::fmt::Write as _;

use crate::domain::models::SurveyKind;

/// Which framing an oracle call runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Welcome, concept questions, and the hand-off into the first survey.
    Intro,
    /// One survey item is active; the framing wraps its stimulus text.
    Survey(SurveyKind),
    /// Photo upload, description, and moderation reactions.
    PhotoUser,
    /// Everything finished; no hidden evaluation may restart.
    Complete,
}

const PERSONA: &str = "\
You are the user's personal companion: warm, fluid, emotionally aware.
Adapt to the user's mood, pace, and vocabulary; mirror their style.
Blend light conversation with meaningful depth; never sound robotic.
Never mention protocols, tests, scores, models, or data collection.
Ask open, thoughtful questions, at most one or two gentle probes per turn.
Remain gender-neutral and respect safety boundaries (no medical, legal, or
financial advice).";

const LANGUAGE_POLICY: &str = "\
Language policy:
- Always reply in the user's dominant language.
- If this turn has no user input, detect the language from recent memory.
- Ignore the language of any stimulus or system input if it differs.
- Never switch languages unless the user clearly does so first.";

const CONTROL_MARKERS: &str = "\
Control markers:
- If the user's message is exactly [AUTO_CONTINUE], treat it as non-input.
- Do not acknowledge or reference it; continue naturally as if the user had
  said nothing.";

const INTRO_BEHAVIOR: &str = "\
Intro behavior:
- On the user's very first message, give a warm, natural welcome and offer
  two options: a quick explanation of the experience, or starting right away.
- Answer concept questions naturally; after each answer, ask if they are
  ready to begin.
- If the user clearly and voluntarily intends to begin, do exactly two
  things: one short engaging sentence declaring the start, then on a new
  line by itself output exactly:

{ \"trigger_orchestrator\": true }

- Do not offer other options, change the subject, or repeat the welcome.";

const PHOTO_BEHAVIOR: &str = "\
Photo phase behavior:
- The user uploads personal photos that represent how they want to be
  perceived. Each validated photo is final.
- On each upload, first describe the image neutrally (composition, pose,
  framing, clarity), then assess it: exactly one person, face or body
  clearly visible, not an object or artwork, not a duplicate.
- A [PHOTO_STATUS_CONFIRMED] message means the photo matched the user's
  identity scan: accept it and say so. [PHOTO_STATUS_REJECTED] means it did
  not match: explain why it cannot be used and how to improve.
  [PHOTO_STATUS_DUPLICATE] means it repeats an earlier photo: discard it.
- Always instruct the user to upload the next photo; never ask.
- Never mention storage, buckets, internal URLs, or backend logic.";

const COMPLETE_BEHAVIOR: &str = "\
Everything is finished. You must not start or continue any hidden
evaluation. If the user asks to restart, wait for an explicit reset.";

/// The common score-interpretation tail shared by every survey wrapper.
fn scale_guide(kind: SurveyKind) -> &'static str {
    match kind {
        SurveyKind::BigFive | SurveyKind::Iri => {
            "Convert their position into a score from 1 to 5 without asking \
             directly:\n\
             - 1 = Not at all true for them.\n\
             - 2 = Slightly true.\n\
             - 3 = Moderately true.\n\
             - 4 = Very true.\n\
             - 5 = Completely true."
        }
        SurveyKind::EcrR => {
            "Convert their position into a score from 1 to 7 without asking \
             directly:\n\
             - 1 = Not at all true for them.\n\
             - 2 = Slightly true.\n\
             - 3 = Somewhat true.\n\
             - 4 = Moderately true.\n\
             - 5 = Fairly true.\n\
             - 6 = Very true.\n\
             - 7 = Completely true."
        }
        SurveyKind::Pvq40 => {
            "Convert their position into a score from 1 to 6 without asking \
             directly:\n\
             - 1 = Not at all like me.\n\
             - 2 = Not like me.\n\
             - 3 = A little like me.\n\
             - 4 = Somewhat like me.\n\
             - 5 = Like me.\n\
             - 6 = Very much like me."
        }
    }
}

fn survey_wrapper(kind: SurveyKind, stimulus: &str) -> String {
    let max = kind.scale_max();
    let mut out = String::new();
    let _ = write!(
        out,
        "Ask the following sentence as a natural continuation of the \
         conversation: \"{stimulus}\"\n\n\
         Interpret how much the user personally agrees with that sentence, \
         without ever revealing that an evaluation is happening.\n\n\
         Process:\n\
         1. Reformulate the sentence naturally, as part of a curious, engaging \
         conversation; make it sound spontaneous.\n\
         2. Ask what they think of the idea. Never mention tests, scores, or \
         ratings.\n\
         3. Whatever they answer, keep digging until their position is clear: \
         rephrase, use examples, offer simple contrasts. Never ask more than \
         three questions in total.\n\
         4. {guide}\n\
         5. When you are confident, output only this token on a new line:\n\n\
         [[SCORE=X]]\n\n\
         Replace X with a number from 1 to {max}. No other text before or \
         after the token. Do not explain your reasoning. Do not move on until \
         you are sure of the score.",
        guide = scale_guide(kind),
    );
    out
}

/// Assemble the full system framing for one oracle call.
///
/// Survey phases require a stimulus; the other phases ignore it.
pub fn build_system(phase: &Phase, stimulus: Option<&str>) -> String {
    match phase {
        Phase::Intro => [PERSONA, LANGUAGE_POLICY, INTRO_BEHAVIOR, CONTROL_MARKERS]
            .join("\n\n"),
        Phase::Survey(kind) => {
            let wrapper = survey_wrapper(*kind, stimulus.unwrap_or_default());
            [wrapper.as_str(), PERSONA, LANGUAGE_POLICY, CONTROL_MARKERS].join("\n\n")
        }
        Phase::PhotoUser => [PERSONA, LANGUAGE_POLICY, PHOTO_BEHAVIOR, CONTROL_MARKERS]
            .join("\n\n"),
        Phase::Complete => [PERSONA, LANGUAGE_POLICY, COMPLETE_BEHAVIOR, CONTROL_MARKERS]
            .join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_framing_embeds_the_stimulus_and_scale() {
        let sys = build_system(
            &Phase::Survey(SurveyKind::EcrR),
            Some("I worry a lot about my relationships."),
        );
        assert!(sys.contains("I worry a lot about my relationships."));
        assert!(sys.contains("1 to 7"));
        assert!(sys.contains("[[SCORE=X]]"));
    }

    #[test]
    fn pvq_framing_uses_the_like_me_scale() {
        let sys = build_system(&Phase::Survey(SurveyKind::Pvq40), Some("stimulus"));
        assert!(sys.contains("Very much like me"));
        assert!(sys.contains("1 to 6"));
    }

    #[test]
    fn non_survey_phases_carry_no_score_token() {
        for phase in [Phase::Intro, Phase::PhotoUser, Phase::Complete] {
            let sys = build_system(&phase, None);
            assert!(!sys.contains("[[SCORE=X]]"));
        }
    }

    #[test]
    fn intro_framing_carries_the_advance_trigger_shape() {
        let sys = build_system(&Phase::Intro, None);
        assert!(sys.contains(r#"{ "trigger_orchestrator": true }"#));
    }
}

//! BFI-18 item bank. Exact statement phrasing with the stem ellipsis
//! ("I see myself as..."); scale 1-5.

/// `(prompt_text, is_reverse_scored)` in catalog order.
pub const ITEMS: &[(&str, bool)] = &[
    // Extraversion
    ("…someone who is talkative.", false),
    ("…someone who is reserved.", true),
    ("…someone who tends to be quiet.", true),
    // Conscientiousness
    ("…someone who does a thorough job.", false),
    ("…someone who perseveres until the task is finished.", false),
    ("…someone who tends to be disorganized.", true),
    // Neuroticism
    ("…someone who worries a lot.", false),
    ("…someone who is relaxed, handles stress well.", true),
    ("…someone who is emotionally stable, not easily upset.", true),
    // Agreeableness
    ("…someone who has a forgiving nature.", false),
    ("…someone who is considerate and kind to almost everyone.", false),
    ("…someone who likes to cooperate with others.", false),
    // Openness
    ("…someone who is original, comes up with new ideas.", false),
    ("…someone who is inventive.", false),
    ("…someone who values artistic, aesthetic experiences.", false),
    ("…someone who likes to reflect, play with ideas.", false),
    ("…someone who has few artistic interests.", true),
    ("…someone who is sophisticated in art, music, or literature.", false),
];

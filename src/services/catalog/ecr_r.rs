//! ECR-R (Fraley, Waller, & Brennan, 2000), 36 items; scale 1-7.
//! Anxiety 1-18, Avoidance 19-36; reverse keys per the published form.

/// `(prompt_text, is_reverse_scored)` in catalog order.
pub const ITEMS: &[(&str, bool)] = &[
    // Anxiety
    ("I'm afraid that I will lose my partner's love.", false),
    ("I often worry that my partner will not want to stay with me.", false),
    ("I often worry that my partner doesn't really love me.", false),
    ("I worry that romantic partners won't care about me as much as I care about them.", false),
    ("I often wish that my partner's feelings for me were as strong as my feelings for him or her.", false),
    ("I worry a lot about my relationships.", false),
    ("When my partner is out of sight, I worry that he or she might become interested in someone else.", false),
    ("When I show my feelings for romantic partners, I'm afraid they will not feel the same about me.", false),
    ("I rarely worry about my partner leaving me.", true),
    ("My romantic partner makes me doubt myself.", false),
    ("I do not often worry about being abandoned.", true),
    ("I find that my partner(s) don't want to get as close as I would like.", false),
    ("Sometimes romantic partners change their feelings about me for no apparent reason.", false),
    ("My desire to be very close sometimes scares people away.", false),
    ("I'm afraid that once a romantic partner gets to know me, he or she won't like who I really am.", false),
    ("It makes me mad that I don't get the affection and support I need from my partner.", false),
    ("I worry that I won't measure up to other people.", false),
    ("My partner only seems to notice me when I'm angry.", false),
    // Avoidance
    ("I prefer not to show a partner how I feel deep down.", false),
    ("I feel comfortable sharing my private thoughts and feelings with my partner.", true),
    ("I find it difficult to allow myself to depend on romantic partners.", false),
    ("I am very comfortable being close to romantic partners.", true),
    ("I don't feel comfortable opening up to romantic partners.", false),
    ("I prefer not to be too close to romantic partners.", false),
    ("I get uncomfortable when a romantic partner wants to be very close.", false),
    ("I find it relatively easy to get close to my partner.", true),
    ("It's not difficult for me to get close to my partner.", true),
    ("I usually discuss my problems and concerns with my partner.", true),
    ("It helps to turn to my romantic partner in times of need.", true),
    ("I tell my partner just about everything.", true),
    ("I talk things over with my partner.", true),
    ("I am nervous when partners get too close to me.", false),
    ("I feel comfortable depending on romantic partners.", true),
    ("I find it easy to depend on romantic partners.", true),
    ("It's easy for me to be affectionate with my partner.", true),
    ("My partner really understands me and my needs.", true),
];

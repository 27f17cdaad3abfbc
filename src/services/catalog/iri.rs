//! Interpersonal Reactivity Index (Davis, 1980/1983), 28 items; scale 1-5.
//! Reverse keys follow the published (-) markings.

/// `(prompt_text, is_reverse_scored)` in catalog order.
pub const ITEMS: &[(&str, bool)] = &[
    ("I daydream and fantasize, with some regularity, about things that might happen to me.", false),
    ("I often have tender, concerned feelings for people less fortunate than me.", false),
    ("I sometimes find it difficult to see things from the \"other guy's\" point of view.", true),
    ("Sometimes I don't feel very sorry for other people when they are having problems.", true),
    ("I really get involved with the feelings of the characters in a novel.", false),
    ("In emergency situations, I feel apprehensive and ill-at-ease.", false),
    ("I am usually objective when I watch a movie or play, and I don't often get completely caught up in it.", true),
    ("I try to look at everybody's side of a disagreement before I make a decision.", false),
    ("When I see someone being taken advantage of, I feel kind of protective towards them.", false),
    ("I sometimes feel helpless when I am in the middle of a very emotional situation.", false),
    ("I sometimes try to understand my friends better by imagining how things look from their perspective.", false),
    ("Becoming extremely involved in a good book or movie is somewhat rare for me.", true),
    ("When I see someone get hurt, I tend to remain calm.", true),
    ("Other people's misfortunes do not usually disturb me a great deal.", true),
    ("If I'm sure I'm right about something, I don't waste much time listening to other people's arguments.", true),
    ("After seeing a play or movie, I have felt as though I were one of the characters.", false),
    ("Being in a tense emotional situation scares me.", false),
    ("When I see someone being treated unfairly, I sometimes don't feel very much pity for them.", true),
    ("I am usually pretty effective in dealing with emergencies.", true),
    ("I am often quite touched by things that I see happen.", false),
    ("I believe that there are two sides to every question and try to look at them both.", false),
    ("I would describe myself as a pretty soft-hearted person.", false),
    ("When I watch a good movie, I can very easily put myself in the place of a leading character.", false),
    ("I tend to lose control during emergencies.", false),
    ("When I'm upset at someone, I usually try to 'put myself in his shoes' for a while.", false),
    ("When I am reading an interesting story or novel, I imagine how I would feel if the events in the story were happening to me.", false),
    ("When I see someone who badly needs help in an emergency, I go to pieces.", false),
    ("Before criticizing somebody, I try to imagine how I would feel if I were in their place.", false),
];

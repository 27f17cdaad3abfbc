//! Portrait Values Questionnaire (PVQ-40, masculine form), 40 items; scale 1-6.
//! Phrasing is copied verbatim from the published form, including its
//! typographic apostrophes and low-quote commas. No reverse-keyed items.

/// `(prompt_text, is_reverse_scored)` in catalog order.
pub const ITEMS: &[(&str, bool)] = &[
    ("Thinking up new ideas and being creative is important to him. He likes to do things in his own original way.", false),
    ("It is important to him to be rich. He wants to have a lot of money and expensive things.", false),
    ("He thinks it is important that every person in the world be treated equally. He believes everyone should have equal opportunities in life.", false),
    ("It’s very important to him to show his abilities. He wants people to admire what he does.", false),
    ("It is important to him to live in secure surroundings. He avoids anything that might endanger his safety.", false),
    ("He thinks it is important to do lots of different things in life. He always looks for new things to try.", false),
    ("He believes that people should do what they’re told. He thinks people should follow rules at all times‚ even when no one is watching.", false),
    ("It is important to him to listen to people who are different from him. Even when he disagrees with them‚ he still wants to understand them.", false),
    ("He thinks it’s important not to ask for more than what you have. He believes that people should be satisfied with what they have.", false),
    ("He seeks every chance he can to have fun. It is important to him to do things that give him pleasure.", false),
    ("It is important to him to make his own decisions about what he does. He likes to be free to plan and to choose his activities for himself.", false),
    ("It’s very important to him to help the people around him. He wants to care for their well-being.", false),
    ("Being very successful is important to him. He likes to impress other people.", false),
    ("It is very important to him that his country be safe. He thinks the state must be on watch against threats from within and without.", false),
    ("He likes to take risks. He is always looking for adventures.", false),
    ("It is important to him to always behave properly. He wants to avoid doing anything people would say is wrong.", false),
    ("It is important to him to be in charge and tell others what to do. He wants people to do what he says.", false),
    ("It is important to him to be loyal to his friends. He wants to devote himself to people close to him.", false),
    ("He strongly believes that people should care for nature.", false),
    ("Religious belief is important to him. He tries hard to do what his religion requires.", false),
    ("It is important to him that things be organized and clean. He really does not like things to be a mess.", false),
    ("He thinks it’s important to be interested in things. He likes to be curious and to try to understand all sorts of things.", false),
    ("He believes all the world’s people should live in harmony. Promoting peace among all groups in the world is important to him.", false),
    ("He thinks it is important to be ambitious. He wants to show how capable he is.", false),
    ("He thinks it is best to do things in traditional ways. It is important to him to keep up the customs he has learned.", false),
    ("Enjoying life’s pleasures is important to him. He likes to spoil himself.", false),
    ("It is important to him to respond to the needs of others. He tries to support those he knows.", false),
    ("He believes he should always show respect to his parents and to older people. It is important to him to be obedient.", false),
    ("He wants everyone to be treated justly‚ even people he doesn’t know. It is important to him to protect the weak in society.", false),
    ("He likes surprises. It is important to him to have an exciting life.", false),
    ("He tries hard to avoid getting sick. Staying healthy is very important to him.", false),
    ("Getting ahead in life is important to him. He strives to do better than others.", false),
    ("Forgiving people who have hurt him is important to him. He tries to see what is good in them and not to hold a grudge.", false),
    ("It is important to him to be independent. He likes to rely on himself.", false),
    ("Having a stable government is important to him. He is concerned that the social order be protected.", false),
    ("It is important to him to be polite to other people all the time. He tries never to disturb or irritate others.", false),
    ("He really wants to enjoy life. Having a good time is very important to him.", false),
    ("It is important to him to be humble and modest. He tries not to draw attention to himself.", false),
    ("He always wants to be the one who makes the decisions. He likes to be the leader.", false),
    ("It is important to him to adapt to nature and to fit into it. He believes that people should not change nature.", false),
];

// Keyword Tables
// Surface and token vocabularies consulted by the annotated strategy

/// Vocabulary for the per-category tests. Kept as data so the tests and the
/// priority resolution can be exercised independently.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTables {
    /// First-token words that open a question
    pub question_words: &'static [&'static str],
    pub uncertainty_phrases: &'static [&'static str],
    /// First-token auxiliaries that open a yes/no question
    pub question_auxiliaries: &'static [&'static str],
    pub decision_verbs: &'static [&'static str],
    pub decision_nouns: &'static [&'static str],
    pub passive_decision_markers: &'static [&'static str],
    pub action_indicators: &'static [&'static str],
    pub obligation_words: &'static [&'static str],
    /// Tokens that turn a preceding PERSON into an assignment
    pub assignment_followers: &'static [&'static str],
}

pub const QUESTION_WORDS: &[&str] = &["what", "how", "when", "where", "why", "who", "which", "whose"];

pub const UNCERTAINTY_PHRASES: &[&str] = &[
    "unclear",
    "unsure",
    "not sure",
    "question",
    "wondering",
    "need clarification",
    "open item",
    "to be determined",
    "tbd",
];

pub const QUESTION_AUXILIARIES: &[&str] = &["do", "does", "did", "can", "could", "will", "would", "should"];

pub const DECISION_VERBS: &[&str] = &[
    "decided",
    "agreed",
    "resolved",
    "concluded",
    "determined",
    "approved",
    "confirmed",
    "finalized",
    "settled",
];

pub const DECISION_NOUNS: &[&str] = &[
    "decision",
    "agreement",
    "resolution",
    "conclusion",
    "approval",
    "confirmation",
    "verdict",
    "ruling",
];

pub const PASSIVE_DECISION_MARKERS: &[&str] = &["it was decided", "it was agreed", "it was resolved"];

pub const ACTION_INDICATORS: &[&str] = &[
    "will",
    "should",
    "must",
    "need to",
    "have to",
    "going to",
    "action",
    "task",
    "todo",
    "assign",
    "responsible",
    "follow up",
    "next step",
    "deliverable",
    "owner",
];

pub const OBLIGATION_WORDS: &[&str] = &["should", "must", "need", "have"];

pub const ASSIGNMENT_FOLLOWERS: &[&str] = &["will", "should", "must", "to"];

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            question_words: QUESTION_WORDS,
            uncertainty_phrases: UNCERTAINTY_PHRASES,
            question_auxiliaries: QUESTION_AUXILIARIES,
            decision_verbs: DECISION_VERBS,
            decision_nouns: DECISION_NOUNS,
            passive_decision_markers: PASSIVE_DECISION_MARKERS,
            action_indicators: ACTION_INDICATORS,
            obligation_words: OBLIGATION_WORDS,
            assignment_followers: ASSIGNMENT_FOLLOWERS,
        }
    }
}

/// True if `haystack` contains any of the phrases as a substring
pub fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| haystack.contains(phrase))
}

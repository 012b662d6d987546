// Unit Classifiers
// Assigns each unit at most one category, Question > Decision > Action

use crate::models::{Category, StrategyKind, Token, Unit};

use super::keywords::{contains_any, KeywordTables};
use super::patterns::PatternSet;

/// Decides the category of a single unit. Implementations must be total
/// over any text and must not mutate shared state.
pub trait Classifier: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn classify(&self, unit: &Unit) -> Option<Category>;
}

/// Outcome of the three independent category tests for one unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySignals {
    pub question: bool,
    pub decision: bool,
    pub action: bool,
}

impl CategorySignals {
    pub fn fired(&self, category: Category) -> bool {
        match category {
            Category::Question => self.question,
            Category::Decision => self.decision,
            Category::Action => self.action,
        }
    }
}

/// First category in priority order whose test fired
pub fn resolve_priority(signals: CategorySignals) -> Option<Category> {
    Category::PRIORITY
        .into_iter()
        .find(|category| signals.fired(*category))
}

// ============ Pattern strategy ============

/// Regex-only strategy; stops at the first category whose group matches
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    patterns: PatternSet,
}

impl PatternClassifier {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }
}

impl Classifier for PatternClassifier {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Patterns
    }

    fn classify(&self, unit: &Unit) -> Option<Category> {
        Category::PRIORITY
            .into_iter()
            .find(|category| self.patterns.group(*category).matches(&unit.text))
    }
}

// ============ Annotation strategy ============

/// Keyword and token-feature strategy; runs all three tests, then resolves
#[derive(Debug, Clone, Default)]
pub struct AnnotationClassifier {
    keywords: KeywordTables,
}

impl AnnotationClassifier {
    pub fn new(keywords: KeywordTables) -> Self {
        Self { keywords }
    }

    pub fn signals(&self, unit: &Unit) -> CategorySignals {
        let lower = unit.text.to_lowercase();
        let tokens = unit.tokens();
        CategorySignals {
            question: self.is_question(&unit.text, &lower, tokens),
            decision: self.is_decision(&lower, tokens),
            action: self.is_action(&lower, tokens),
        }
    }

    fn is_question(&self, text: &str, lower: &str, tokens: &[Token]) -> bool {
        if text.contains('?') {
            return true;
        }

        let first = tokens.first();
        let first_lower = first.map(Token::lower).unwrap_or_default();
        if self.keywords.question_words.contains(&first_lower.as_str()) {
            return true;
        }

        if contains_any(lower, self.keywords.uncertainty_phrases) {
            return true;
        }

        matches!(first, Some(t) if t.pos == "AUX")
            && self.keywords.question_auxiliaries.contains(&first_lower.as_str())
    }

    fn is_decision(&self, lower: &str, tokens: &[Token]) -> bool {
        contains_any(lower, self.keywords.decision_verbs)
            || contains_any(lower, self.keywords.decision_nouns)
            || contains_any(lower, self.keywords.passive_decision_markers)
            || past_decision_lemma(tokens, self.keywords.decision_verbs)
    }

    fn is_action(&self, lower: &str, tokens: &[Token]) -> bool {
        contains_any(lower, self.keywords.action_indicators)
            || imperative_lead(tokens)
            || will_then_verb(tokens)
            || has_obligation(tokens, self.keywords.obligation_words)
            || person_assignment(tokens, self.keywords.assignment_followers)
    }
}

/// A VBD/VBN verb whose lemma is in the past-form table. Lemmas are compared as-is.
fn past_decision_lemma(tokens: &[Token], decision_verbs: &[&str]) -> bool {
    tokens.iter().any(|t| {
        t.is_verb() && (t.tag == "VBD" || t.tag == "VBN") && decision_verbs.contains(&t.lemma.as_str())
    })
}

/// First token is a base-form verb
fn imperative_lead(tokens: &[Token]) -> bool {
    matches!(tokens.first(), Some(t) if t.is_verb() && t.tag == "VB")
}

fn will_then_verb(tokens: &[Token]) -> bool {
    tokens
        .windows(2)
        .any(|pair| pair[0].lower() == "will" && pair[1].is_verb())
}

fn has_obligation(tokens: &[Token], obligation_words: &[&str]) -> bool {
    tokens
        .iter()
        .any(|t| (t.pos == "VERB" || t.pos == "AUX") && obligation_words.contains(&t.lower().as_str()))
}

/// A PERSON entity directly followed by an assignment word ("Priya to ...")
fn person_assignment(tokens: &[Token], followers: &[&str]) -> bool {
    tokens
        .windows(2)
        .any(|pair| pair[0].ent_type == "PERSON" && followers.contains(&pair[1].lower().as_str()))
}

impl Classifier for AnnotationClassifier {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Annotated
    }

    fn classify(&self, unit: &Unit) -> Option<Category> {
        resolve_priority(self.signals(unit))
    }
}

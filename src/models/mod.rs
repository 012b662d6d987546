// Meeting Notes Data Models
// Units, annotations and analysis results shared by the engine and its front ends

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Categories ============

/// Extraction target for a single unit
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Action,
    Decision,
    Question,
}

impl Category {
    /// Resolution order when more than one category test fires
    pub const PRIORITY: [Category; 3] = [Category::Question, Category::Decision, Category::Action];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Decision => "decision",
            Category::Question => "question",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Strategy ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Annotated,
    Patterns,
}

impl StrategyKind {
    /// Human-readable method name used in reports and status lines
    pub fn method_label(&self) -> &'static str {
        match self {
            StrategyKind::Annotated => "Spacy NLP",
            StrategyKind::Patterns => "Pattern Matching",
        }
    }
}

// ============ Annotation ============

/// One token with its linguistic annotation (spaCy-style labels)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    /// Universal POS tag (VERB, AUX, NOUN, PROPN, ...)
    pub pos: String,
    /// Penn Treebank tag (VB, VBD, VBN, MD, ...)
    pub tag: String,
    pub lemma: String,
    /// Entity label such as PERSON or DATE; empty outside entities
    #[serde(default)]
    pub ent_type: String,
}

impl Token {
    pub fn new(text: &str, pos: &str, tag: &str, lemma: &str, ent_type: &str) -> Self {
        Self {
            text: text.to_string(),
            pos: pos.to_string(),
            tag: tag.to_string(),
            lemma: lemma.to_string(),
            ent_type: ent_type.to_string(),
        }
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_verb(&self) -> bool {
        self.pos == "VERB"
    }
}

/// A sentence as returned by an annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

// ============ Unit ============

/// A candidate span (sentence or trimmed line) evaluated for category membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub text: String,
    /// Present only when the unit came from an annotator
    pub tokens: Option<Vec<Token>>,
}

impl Unit {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: None,
        }
    }

    pub fn annotated(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens: Some(tokens),
        }
    }

    /// Tokens of the unit, empty when no annotation is attached
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_deref().unwrap_or(&[])
    }
}

// ============ Analysis Result ============

/// Categorized, de-duplicated output of one analysis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub strategy: StrategyKind,
    pub actions: Vec<String>,
    pub decisions: Vec<String>,
    pub questions: Vec<String>,
}

impl AnalysisResult {
    pub fn empty(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            actions: Vec::new(),
            decisions: Vec::new(),
            questions: Vec::new(),
        }
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Action => &self.actions,
            Category::Decision => &self.decisions,
            Category::Question => &self.questions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.decisions.is_empty() && self.questions.is_empty()
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            total_actions: self.actions.len(),
            total_decisions: self.decisions.len(),
            total_questions: self.questions.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total_actions: usize,
    pub total_decisions: usize,
    pub total_questions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            Category::PRIORITY,
            [Category::Question, Category::Decision, Category::Action]
        );
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let mut result = AnalysisResult::empty(StrategyKind::Patterns);
        result.actions.push("Send notes.".to_string());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["strategy"], "patterns");
        assert_eq!(json["actions"][0], "Send notes.");
        assert!(json["questions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_token_deserializes_without_entity() {
        let token: Token =
            serde_json::from_str(r#"{"text":"ship","pos":"VERB","tag":"VB","lemma":"ship"}"#).unwrap();
        assert_eq!(token.ent_type, "");
        assert!(token.is_verb());
    }

    #[test]
    fn test_unit_without_annotation_has_no_tokens() {
        let unit = Unit::plain("hello");
        assert!(unit.tokens().is_empty());
        assert!(unit.tokens.is_none());
    }
}

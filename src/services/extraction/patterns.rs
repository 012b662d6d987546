// Pattern Groups
// Case-insensitive regex groups for the pattern-matching strategy

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::warn;

use crate::models::Category;
use crate::services::config_store::PatternConfig;

pub const QUESTION_PATTERNS: &[&str] = &[
    r"[^.!?]*\?",
    r"\b(?:question|ask|wondering|unclear|unsure)\s+(?:about|if|whether)\s+[^.!?]+",
    r"\b(?:what|how|when|where|why|who)\s+[^.!?]+\?",
    r"\b(?:need to clarify|need clarification|open item)\s+[^.!?]+",
];

pub const DECISION_PATTERNS: &[&str] = &[
    r"\b(?:decided|agreed|resolved|concluded|determined)\s+(?:to|that)\s+[^.!?]+",
    r"\b(?:we|they|it was)\s+(?:decided|agreed|resolved)\s+[^.!?]+",
    r"\b(?:decision|conclusion|agreement):\s*[^.!?]+",
    r"\b(?:final|official)\s+(?:decision|call|verdict)\s+[^.!?]+",
];

pub const ACTION_PATTERNS: &[&str] = &[
    r"\b(?:will|should|must|need to|have to|going to)\s+[^.!?]+",
    r"\b(?:action|task|todo|follow up|next step):\s*[^.!?]+",
    r"\b[A-Z][a-z]+\s+(?:will|should|must|needs to)\s+[^.!?]+",
    r"\b(?:assign|delegate|responsible for)\s+[^.!?]+",
];

#[derive(Error, Debug)]
#[error("Invalid {category} pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub category: Category,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled patterns for one category
#[derive(Debug, Clone)]
pub struct PatternGroup {
    category: Category,
    patterns: Vec<Regex>,
}

impl PatternGroup {
    pub fn compile<S: AsRef<str>>(category: Category, sources: &[S]) -> Result<Self, PatternError> {
        let patterns = sources
            .iter()
            .map(|src| {
                RegexBuilder::new(src.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PatternError {
                        category,
                        pattern: src.as_ref().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { category, patterns })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any pattern matches anywhere in `text`
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// The three pattern groups, compiled once at construction
#[derive(Debug, Clone)]
pub struct PatternSet {
    questions: PatternGroup,
    decisions: PatternGroup,
    actions: PatternGroup,
}

impl PatternSet {
    /// Built-in groups, optionally replaced per category from configuration
    pub fn compile(overrides: &PatternConfig) -> Result<Self, PatternError> {
        fn sources<'a>(custom: &'a Option<Vec<String>>, defaults: &'a [&'a str]) -> Vec<&'a str> {
            match custom {
                Some(list) => list.iter().map(String::as_str).collect(),
                None => defaults.to_vec(),
            }
        }

        let set = Self {
            questions: PatternGroup::compile(
                Category::Question,
                &sources(&overrides.questions, QUESTION_PATTERNS),
            )?,
            decisions: PatternGroup::compile(
                Category::Decision,
                &sources(&overrides.decisions, DECISION_PATTERNS),
            )?,
            actions: PatternGroup::compile(
                Category::Action,
                &sources(&overrides.actions, ACTION_PATTERNS),
            )?,
        };

        for category in Category::PRIORITY {
            if set.group(category).is_empty() {
                warn!(category = %category, "pattern group is empty, category never matches");
            }
        }

        Ok(set)
    }

    pub fn builtin() -> Result<Self, PatternError> {
        Self::compile(&PatternConfig::default())
    }

    pub fn group(&self, category: Category) -> &PatternGroup {
        match category {
            Category::Question => &self.questions,
            Category::Decision => &self.decisions,
            Category::Action => &self.actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_groups_compile() {
        let set = PatternSet::builtin().unwrap();
        for category in Category::PRIORITY {
            assert_eq!(set.group(category).len(), 4);
            assert_eq!(set.group(category).category(), category);
        }
    }

    #[test]
    fn test_question_group() {
        let set = PatternSet::builtin().unwrap();
        let q = set.group(Category::Question);
        assert!(q.matches("What is the budget for Q3?"));
        assert!(q.matches("Still wondering whether legal signed off"));
        assert!(q.matches("Open item on the vendor contract"));
        assert!(!q.matches("The meeting started at 9am."));
    }

    #[test]
    fn test_decision_group() {
        let set = PatternSet::builtin().unwrap();
        let d = set.group(Category::Decision);
        assert!(d.matches("We decided to ship on Friday."));
        assert!(d.matches("It was agreed unanimously"));
        assert!(d.matches("Decision: move standup to 10am"));
        assert!(d.matches("Final call is to keep the vendor"));
        assert!(!d.matches("We discussed the roadmap."));
    }

    #[test]
    fn test_action_group_is_case_insensitive() {
        let set = PatternSet::builtin().unwrap();
        let a = set.group(Category::Action);
        assert!(a.matches("John will send the report by Monday."));
        assert!(a.matches("TODO: update the wiki"));
        assert!(a.matches("action: book the room"));
        assert!(a.matches("Please assign reviewers"));
        assert!(!a.matches("The meeting started at 9am."));
    }

    #[test]
    fn test_override_replaces_group() {
        let overrides = PatternConfig {
            actions: Some(vec![r"\bplease\b".to_string()]),
            ..PatternConfig::default()
        };
        let set = PatternSet::compile(&overrides).unwrap();
        assert_eq!(set.group(Category::Action).len(), 1);
        assert!(set.group(Category::Action).matches("PLEASE review"));
        assert!(!set.group(Category::Action).matches("John will send it"));
        assert_eq!(set.group(Category::Question).len(), 4);
    }

    #[test]
    fn test_empty_override_disables_category() {
        let overrides = PatternConfig {
            questions: Some(Vec::new()),
            ..PatternConfig::default()
        };
        let set = PatternSet::compile(&overrides).unwrap();
        assert!(set.group(Category::Question).is_empty());
        assert!(!set.group(Category::Question).matches("What is the budget?"));
        assert!(!set.group(Category::Decision).is_empty());
    }

    #[test]
    fn test_malformed_pattern_fails_at_construction() {
        let overrides = PatternConfig {
            decisions: Some(vec![r"(unclosed".to_string()]),
            ..PatternConfig::default()
        };
        let err = PatternSet::compile(&overrides).unwrap_err();
        assert_eq!(err.category, Category::Decision);
        assert_eq!(err.pattern, "(unclosed");
        assert!(err.to_string().contains("decision"));
    }
}

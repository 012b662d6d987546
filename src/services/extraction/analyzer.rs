// Meeting Notes Analyzer
// Drives segment -> classify -> aggregate for one text

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{AnalysisResult, Category, StrategyKind, Unit};
use crate::services::annotation::{Annotator, NlpCapability};
use crate::services::config_store::{AppConfig, ConfigError, StrategyPreference};

use super::classifier::{AnnotationClassifier, Classifier, PatternClassifier};
use super::keywords::KeywordTables;
use super::patterns::{PatternError, PatternSet};
use super::segmenter::{LineSegmenter, Segmenter, SentenceSegmenter};

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Annotated strategy requested but no annotator is available")]
    AnnotationUnavailable,
}

/// Classification engine. Holds only immutable tables and the optional
/// annotator, so one instance can serve concurrent calls.
pub struct MeetingNotesAnalyzer {
    segmenter: Box<dyn Segmenter>,
    classifier: Box<dyn Classifier>,
}

impl MeetingNotesAnalyzer {
    pub fn new(segmenter: Box<dyn Segmenter>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            segmenter,
            classifier,
        }
    }

    /// Line segmentation with regex classification
    pub fn patterns(patterns: PatternSet) -> Self {
        Self::new(
            Box::new(LineSegmenter),
            Box::new(PatternClassifier::new(patterns)),
        )
    }

    /// Sentence segmentation and token-aware classification
    pub fn annotated(annotator: Arc<dyn Annotator>) -> Self {
        Self::new(
            Box::new(SentenceSegmenter::new(annotator)),
            Box::new(AnnotationClassifier::new(KeywordTables::default())),
        )
    }

    /// Annotated when the capability has an annotator, patterns otherwise
    pub fn from_capability(capability: &NlpCapability, patterns: PatternSet) -> Self {
        match capability.annotator() {
            Some(annotator) => Self::annotated(annotator),
            None => Self::patterns(patterns),
        }
    }

    pub fn with_preference(
        preference: StrategyPreference,
        capability: &NlpCapability,
        patterns: PatternSet,
    ) -> Result<Self, AnalyzerError> {
        match preference {
            StrategyPreference::Auto => Ok(Self::from_capability(capability, patterns)),
            StrategyPreference::Patterns => Ok(Self::patterns(patterns)),
            StrategyPreference::Annotated => capability
                .annotator()
                .map(Self::annotated)
                .ok_or(AnalyzerError::AnnotationUnavailable),
        }
    }

    /// Build from configuration; bad patterns or values fail here, never per unit
    pub fn from_config(config: &AppConfig, capability: &NlpCapability) -> Result<Self, AnalyzerError> {
        let preference = config.strategy_preference()?;
        let patterns = PatternSet::compile(&config.patterns)?;
        let analyzer = Self::with_preference(preference, capability, patterns)?;
        info!(
            strategy = analyzer.strategy().method_label(),
            annotator = capability.describe(),
            "analyzer.ready"
        );
        Ok(analyzer)
    }

    pub fn strategy(&self) -> StrategyKind {
        self.classifier.kind()
    }

    pub fn segment(&self, text: &str) -> Vec<Unit> {
        self.segmenter.segment(text)
    }

    pub fn classify(&self, unit: &Unit) -> Option<Category> {
        self.classifier.classify(unit)
    }

    /// Categorize every unit of `text`. Each text lands in at most one
    /// category, once, at its first occurrence.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let mut result = AnalysisResult::empty(self.strategy());
        let units = self.segment(text);
        let mut seen: HashSet<String> = HashSet::new();

        for unit in &units {
            let Some(category) = self.classify(unit) else {
                continue;
            };
            if !seen.insert(unit.text.clone()) {
                continue;
            }
            debug!(category = %category, text = %unit.text, "analyzer.classified");
            match category {
                Category::Action => result.actions.push(unit.text.clone()),
                Category::Decision => result.decisions.push(unit.text.clone()),
                Category::Question => result.questions.push(unit.text.clone()),
            }
        }

        let summary = result.summary();
        info!(
            strategy = result.strategy.method_label(),
            units = units.len(),
            actions = summary.total_actions,
            decisions = summary.total_decisions,
            questions = summary.total_questions,
            "analyzer.done"
        );
        result
    }
}

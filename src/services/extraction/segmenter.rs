// Unit Segmenter
// Splits raw notes into candidate units: annotated sentences or trimmed lines

use std::sync::Arc;
use tracing::warn;

use crate::models::Unit;
use crate::services::annotation::Annotator;
use crate::services::text_processor::{split_lines, split_sentences_advanced};

/// Produces the ordered units for one text. Repeated calls on the same
/// input yield the same units.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Unit>;
}

/// One unit per non-empty trimmed line
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmenter;

impl Segmenter for LineSegmenter {
    fn segment(&self, text: &str) -> Vec<Unit> {
        split_lines(text).into_iter().map(Unit::plain).collect()
    }
}

/// One unit per sentence reported by the annotator
pub struct SentenceSegmenter {
    annotator: Arc<dyn Annotator>,
}

impl SentenceSegmenter {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }
}

impl Segmenter for SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<Unit> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        match self.annotator.annotate(text) {
            Ok(sentences) => sentences
                .into_iter()
                .filter_map(|sentence| {
                    let trimmed = sentence.text.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    let tokens = sentence
                        .tokens
                        .into_iter()
                        .filter(|t| t.pos != "SPACE")
                        .collect();
                    Some(Unit::annotated(trimmed, tokens))
                })
                .collect(),
            Err(e) => {
                // Keep sentence boundaries; the units just carry no tokens
                warn!(
                    annotator = self.annotator.name(),
                    error = %e,
                    "Annotation failed, segmenting with the rule-based splitter"
                );
                split_sentences_advanced(text)
                    .into_iter()
                    .filter(|s| !s.text.trim().is_empty())
                    .map(|s| Unit::plain(s.text.trim()))
                    .collect()
            }
        }
    }
}

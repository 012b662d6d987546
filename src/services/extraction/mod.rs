// Extraction Module
// Classification engine for meeting notes:
// - segmenter: text -> ordered units
// - patterns / keywords: immutable tables for the two strategies
// - classifier: per-unit category tests and priority resolution
// - analyzer: aggregation into a de-duplicated AnalysisResult

pub mod analyzer;
pub mod classifier;
pub mod keywords;
pub mod patterns;
pub mod segmenter;

pub use analyzer::{AnalyzerError, MeetingNotesAnalyzer};
pub use classifier::{resolve_priority, AnnotationClassifier, CategorySignals, Classifier, PatternClassifier};
pub use keywords::KeywordTables;
pub use patterns::{PatternError, PatternGroup, PatternSet};
pub use segmenter::{LineSegmenter, Segmenter, SentenceSegmenter};

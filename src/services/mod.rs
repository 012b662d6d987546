// Meeting Notes Core Services
// Text processing, annotation, classification and the presentation helpers

pub mod text_processor;
pub mod config_store;
pub mod annotation;
pub mod extraction;
pub mod document_loader;
pub mod report;

pub use text_processor::*;
pub use config_store::*;
pub use document_loader::{load_notes, LoadError};
pub use report::{render_json, render_report, status_line, write_report};

pub use annotation::{
    AnnotationError,
    AnnotationServiceClient,
    Annotator,
    NlpCapability,
    RuleTagger,
};

pub use extraction::{
    resolve_priority,
    AnalyzerError,
    AnnotationClassifier,
    CategorySignals,
    Classifier,
    KeywordTables,
    LineSegmenter,
    MeetingNotesAnalyzer,
    PatternClassifier,
    PatternError,
    PatternSet,
    Segmenter,
    SentenceSegmenter,
};

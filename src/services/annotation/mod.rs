// Annotation Module
// Optional linguistic annotation capability used by the annotated strategy:
// - service_client: spaCy-compatible HTTP annotation service
// - rule_tagger: in-process English tagger (lexicon + suffix rules)

pub mod rule_tagger;
pub mod service_client;

pub use rule_tagger::RuleTagger;
pub use service_client::AnnotationServiceClient;

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::AnnotatedSentence;
use crate::services::config_store::{AnnotationConfig, AnnotatorKind};

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Annotation service returned error: {0}")]
    Status(u16),
    #[error("Malformed annotation response: {0}")]
    Malformed(String),
}

/// Produces sentences with per-token annotation
pub trait Annotator: Send + Sync {
    fn name(&self) -> &str;

    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>, AnnotationError>;
}

/// Result of probing for an annotator at startup; immutable afterwards
#[derive(Clone)]
pub struct NlpCapability {
    annotator: Option<Arc<dyn Annotator>>,
}

impl fmt::Debug for NlpCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlpCapability")
            .field("annotator", &self.annotator.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}

static GLOBAL_CAPABILITY: OnceLock<NlpCapability> = OnceLock::new();

impl NlpCapability {
    pub fn unavailable() -> Self {
        Self { annotator: None }
    }

    pub fn with_annotator(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator: Some(annotator),
        }
    }

    pub fn is_available(&self) -> bool {
        self.annotator.is_some()
    }

    pub fn annotator(&self) -> Option<Arc<dyn Annotator>> {
        self.annotator.clone()
    }

    pub fn describe(&self) -> &str {
        self.annotator.as_deref().map(|a| a.name()).unwrap_or("unavailable")
    }

    /// Check the configured annotator. Never fails: an unreachable service
    /// or a disabled annotator yields an unavailable capability.
    pub fn detect(kind: AnnotatorKind, config: &AnnotationConfig) -> Self {
        match kind {
            AnnotatorKind::Disabled => {
                info!("annotation.disabled");
                Self::unavailable()
            }
            AnnotatorKind::Builtin => {
                info!(annotator = "builtin", "annotation.ready");
                Self::with_annotator(Arc::new(RuleTagger::new()))
            }
            AnnotatorKind::Service => {
                let timeout = Duration::from_secs(config.timeout_secs.max(1));
                let client = match AnnotationServiceClient::new(&config.service_url, timeout) {
                    Ok(client) => client,
                    Err(e) => {
                        warn!(error = %e, "annotation.client_build_failed");
                        return Self::unavailable();
                    }
                };
                if client.is_available() {
                    info!(url = %config.service_url, "annotation.ready");
                    Self::with_annotator(Arc::new(client))
                } else {
                    warn!(
                        url = %config.service_url,
                        "Annotation service not reachable. Using pattern matching."
                    );
                    Self::unavailable()
                }
            }
        }
    }

    /// Process-wide capability, checked on first use and cached for the process lifetime
    pub fn global(kind: AnnotatorKind, config: &AnnotationConfig) -> &'static NlpCapability {
        GLOBAL_CAPABILITY.get_or_init(|| Self::detect(kind, config))
    }
}

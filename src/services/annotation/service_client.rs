// Annotation Service Client
// Calls a spaCy-compatible annotation service over HTTP

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{AnnotationError, Annotator};
use crate::models::AnnotatedSentence;

const HEALTH_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    sentences: Vec<AnnotatedSentence>,
}

/// Health check response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Annotation service client
pub struct AnnotationServiceClient {
    base_url: String,
    client: Client,
}

impl AnnotationServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnnotationError> {
        // The service is a local sidecar; system proxies would only get in the way.
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(HEALTH_CONNECT_TIMEOUT.min(timeout))
            .no_proxy()
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health(&self) -> Result<HealthResponse, AnnotationError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(AnnotationError::Status(response.status().as_u16()));
        }
        Ok(response.json::<HealthResponse>()?)
    }

    /// Check whether the service is up and has its model loaded
    pub fn is_available(&self) -> bool {
        match self.health() {
            Ok(health) => {
                debug!(status = %health.status, model = ?health.model, "annotation.health");
                health.status == "ok"
            }
            Err(e) => {
                debug!(error = %e, "annotation.health_failed");
                false
            }
        }
    }
}

impl Annotator for AnnotationServiceClient {
    fn name(&self) -> &str {
        "spacy-service"
    }

    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>, AnnotationError> {
        let url = format!("{}/annotate", self.base_url);
        let request = AnnotateRequest { text, language: "en" };

        let response = self.client.post(&url).json(&request).send()?;
        if !response.status().is_success() {
            return Err(AnnotationError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        let parsed: AnnotateResponse = serde_json::from_str(&body)
            .map_err(|e| AnnotationError::Malformed(e.to_string()))?;
        Ok(parsed.sentences)
    }
}

//! Ollama embedding model
//!
//! Calls `POST /api/embed` once per batch. No retries: a failed request
//! fails the whole embedding step.

use crate::embedding::{EmbeddingError, EmbeddingModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Embedding model served by a local Ollama instance
///
/// Requires Ollama to be running with an embedding model pulled
/// (e.g. `ollama pull nomic-embed-text`).
pub struct OllamaEmbeddingModel {
    endpoint: String,
    model: String,
    dimension: usize,
    timeout: Duration,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddingModel {
    /// Create a model client
    ///
    /// `dimension` must match what the served model produces; the vector
    /// index rejects anything else.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimension,
            timeout,
        }
    }
}

impl EmbeddingModel for OllamaEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed("empty embeddings array".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(model = %self.model, count = texts.len(), "Requesting Ollama embeddings");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EmbeddingError::Communication(e.to_string()))?;

        let response = client
            .post(format!("{}/api/embed", self.endpoint))
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| {
                EmbeddingError::Communication(format!(
                    "Ollama connection error (is Ollama running at {}?): {}",
                    self.endpoint, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::Communication(format!(
                "Ollama API error {}: {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| EmbeddingError::InferenceFailed(format!("Invalid Ollama response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        Ok(parsed.embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

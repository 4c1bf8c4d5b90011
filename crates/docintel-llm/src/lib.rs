//! docintel Language-Model Gateway
//!
//! Implementations of the `LlmProvider` trait from `docintel-domain`.
//! Every provider makes exactly one request per call; failures are returned
//! to the caller, never retried.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing, records every prompt
//! - `GeminiProvider`: Google Gemini `generateContent` API
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use docintel_llm::MockProvider;
//! use docintel_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! assert_eq!(provider.prompts(), vec!["test prompt".to_string()]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gemini;
pub mod ollama;

use docintel_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use config::{ConfiguredProvider, GatewayConfig, ProviderKind};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was configured for a provider that needs one
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The gateway configuration is unusable
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider refused the request (HTTP 4xx, safety block, quota)
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The provider answered with something that is not a completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Every prompt it receives is recorded so tests can inspect exactly
/// what the pipeline sent.
///
/// # Examples
///
/// ```
/// use docintel_llm::MockProvider;
/// use docintel_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert_eq!(provider.generate("prompt2").unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    errors: Arc<Mutex<HashMap<String, String>>>,
    failure: Option<String>,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
    schemas: Arc<Mutex<Vec<Option<String>>>>,
}

/// Default request timeout for remote providers (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Build a blocking HTTP client for a single call
///
/// Clients are created inside the blocking worker that uses them so they are
/// never dropped on an async executor thread.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, LlmError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success HTTP status onto the gateway's failure classes
pub(crate) fn status_error(status: reqwest::StatusCode, model: &str, body: String) -> LlmError {
    if status == reqwest::StatusCode::NOT_FOUND {
        LlmError::ModelNotAvailable(model.to_string())
    } else if status.is_client_error() {
        LlmError::Rejected(format!("HTTP {}: {}", status, body))
    } else {
        LlmError::Communication(format!("HTTP {}: {}", status, body))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
            failure: None,
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
            schemas: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with a communication error
    pub fn failing(message: impl Into<String>) -> Self {
        let mut provider = Self::default();
        provider.failure = Some(message.into());
        provider
    }

    /// Sleep before answering, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.errors).insert(prompt.into(), "Mock error".to_string());
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }

    /// Schema passed with each call; `None` for plain-text calls
    pub fn schemas(&self) -> Vec<Option<String>> {
        lock(&self.schemas).clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
        lock(&self.schemas).clear();
    }

    fn respond(&self, prompt: &str, schema: Option<&str>) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.schemas).push(schema.map(str::to_string));

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(message) = &self.failure {
            return Err(LlmError::Communication(message.clone()));
        }
        if let Some(message) = lock(&self.errors).get(prompt) {
            return Err(LlmError::Rejected(message.clone()));
        }
        if let Some(response) = lock(&self.responses).get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.respond(prompt, Some(schema))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        provider.generate_structured("prompt2", "{\"type\":\"array\"}").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);
        assert_eq!(
            provider.schemas(),
            vec![None, Some("{\"type\":\"array\"}".to_string())]
        );
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt");
        assert!(matches!(result.unwrap_err(), LlmError::Rejected(_)));
        assert!(provider.generate("good prompt").is_ok());
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing("network down");
        let err = provider.generate("anything").unwrap_err();
        assert!(matches!(err, LlmError::Communication(ref m) if m == "network down"));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both should share the same recorded prompts due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}

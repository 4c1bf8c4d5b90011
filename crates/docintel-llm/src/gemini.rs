//! Gemini Provider Implementation
//!
//! Talks to Google's `generateContent` REST endpoint. Structured calls ask
//! for `application/json` output and pass the schema as `responseSchema`.

use crate::{http_client, status_error, LlmError, DEFAULT_TIMEOUT_SECS};
use docintel_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Sampling temperature used for every call
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Google Gemini provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    timeout: Duration,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a provider for `model` authenticated with `api_key`
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_llm::GeminiProvider;
    /// use docintel_domain::traits::LlmProvider;
    ///
    /// let provider = GeminiProvider::new("gemini-1.5-flash", "secret");
    /// assert_eq!(provider.model_name(), "gemini-1.5-flash");
    /// ```
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Request body; `Some(schema)` switches on JSON output
    fn request_body<'a>(&self, prompt: &'a str, schema: Option<&str>) -> GenerateContentRequest<'a> {
        let response_schema = schema.and_then(|raw| match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Schema is not valid JSON, requesting plain JSON output: {}", e);
                None
            }
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: schema.map(|_| "application/json"),
                response_schema,
            },
        }
    }

    fn call(&self, prompt: &str, schema: Option<&str>) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingCredential(
                "Gemini API key is empty".to_string(),
            ));
        }

        debug!(model = %self.model, json_mode = schema.is_some(), prompt_chars = prompt.len(), "Calling Gemini");

        let client = http_client(self.timeout)?;
        let response = client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt, schema))
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, &self.model, body));
        }

        let body = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;
        parse_response(&body)
    }
}

/// Pull the completion text out of a `generateContent` response body
fn parse_response(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(LlmError::Rejected(reason));
    };

    match candidate.content {
        Some(content) => Ok(content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .concat()),
        None => {
            let reason = candidate.finish_reason.unwrap_or_default();
            match reason.as_str() {
                "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
                    Err(LlmError::Rejected(format!("finish reason {}", reason)))
                }
                // Finished without content: an empty completion
                _ => Ok(String::new()),
            }
        }
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.call(prompt, Some(schema))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("gemini-1.5-pro", "key")
            .with_endpoint("http://localhost:8080/")
            .with_temperature(0.0);
        assert_eq!(provider.model, "gemini-1.5-pro");
        assert_eq!(provider.temperature, 0.0);
        assert_eq!(
            provider.url(),
            "http://localhost:8080/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_text_mode() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key");
        let body = serde_json::to_value(provider.request_body("hi", None)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!(body["generationConfig"].get("responseMimeType").is_none());
        assert!(body["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_request_body_json_mode() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key");
        let schema = r#"{"type":"array","items":{"type":"object","properties":{"title":{"type":"string"}}}}"#;
        let body = serde_json::to_value(provider.request_body("hi", Some(schema))).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "array");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["properties"]["title"]["type"],
            "string"
        );
    }

    #[test]
    fn test_request_body_unparsable_schema() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key");
        let body = serde_json::to_value(provider.request_body("hi", Some("not json"))).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!(body["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello, "},{"text":"world"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Hello, world");
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let body = r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, LlmError::Rejected(ref r) if r == "SAFETY"));
    }

    #[test]
    fn test_parse_response_safety_finish() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert!(matches!(parse_response(body), Err(LlmError::Rejected(_))));
    }

    #[test]
    fn test_parse_response_garbage() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_empty_key_is_missing_credential() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "");
        assert!(matches!(
            provider.generate("hi"),
            Err(LlmError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key")
            .with_endpoint("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));
        assert!(matches!(
            provider.generate("hi"),
            Err(LlmError::Communication(_))
        ));
    }
}

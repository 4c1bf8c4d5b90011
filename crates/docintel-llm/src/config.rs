//! Gateway configuration and provider construction

use crate::{gemini, ollama, GeminiProvider, LlmError, MockProvider, OllamaProvider};
use docintel_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which backend serves generation calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
    /// Deterministic offline mock
    Mock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

/// Configuration for the language-model gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Backend to use
    pub provider: ProviderKind,

    /// Model identifier
    pub model: String,

    /// Inline API key; takes precedence over `api_key_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Override for the provider's base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: gemini::DEFAULT_MODEL.to_string(),
            api_key: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: gemini::DEFAULT_TEMPERATURE,
            endpoint: None,
            timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() && self.provider != ProviderKind::Mock {
            return Err("gateway.model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("gateway.temperature must be between 0.0 and 2.0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("gateway.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from the inline value or the environment
    pub fn resolve_api_key(&self) -> Result<String, LlmError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LlmError::MissingCredential(format!(
                "set {} or gateway.api_key",
                self.api_key_env
            ))),
        }
    }

    /// Construct the configured provider
    pub fn build(&self) -> Result<ConfiguredProvider, LlmError> {
        self.validate().map_err(LlmError::InvalidConfig)?;

        let provider = match self.provider {
            ProviderKind::Gemini => {
                let mut provider = GeminiProvider::new(&self.model, self.resolve_api_key()?)
                    .with_temperature(self.temperature)
                    .with_timeout(self.timeout());
                if let Some(endpoint) = &self.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                ConfiguredProvider::Gemini(provider)
            }
            ProviderKind::Ollama => {
                let endpoint = self
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| ollama::DEFAULT_ENDPOINT.to_string());
                ConfiguredProvider::Ollama(
                    OllamaProvider::new(endpoint, &self.model)
                        .with_temperature(self.temperature)
                        .with_timeout(self.timeout()),
                )
            }
            ProviderKind::Mock => ConfiguredProvider::Mock(MockProvider::default()),
        };

        Ok(provider)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// A provider selected at runtime from configuration
pub enum ConfiguredProvider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
    /// Deterministic mock
    Mock(MockProvider),
}

impl LlmProviderTrait for ConfiguredProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::Gemini(p) => p.generate(prompt),
            ConfiguredProvider::Ollama(p) => p.generate(prompt),
            ConfiguredProvider::Mock(p) => p.generate(prompt),
        }
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::Gemini(p) => p.generate_structured(prompt, schema),
            ConfiguredProvider::Ollama(p) => p.generate_structured(prompt, schema),
            ConfiguredProvider::Mock(p) => p.generate_structured(prompt, schema),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            ConfiguredProvider::Gemini(p) => p.model_name(),
            ConfiguredProvider::Ollama(p) => p.model_name(),
            ConfiguredProvider::Mock(p) => p.model_name(),
        }
    }
}

//! Embedding configuration

use crate::embedding::{EmbeddingError, EmbeddingModel, HashingEmbeddingModel, DEFAULT_DIMENSION};
use crate::remote::{OllamaEmbeddingModel, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Which backend produces embeddings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Offline feature hashing
    #[default]
    Hashing,
    /// Ollama `/api/embed`
    Ollama,
    /// In-process fastembed (requires the `local-embeddings` feature)
    Local,
}

/// Configuration for the embedding capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend to use
    pub provider: EmbeddingProviderKind,

    /// Model identifier (Ollama model name or local model name)
    pub model: String,

    /// Vector dimension
    pub dimension: usize,

    /// Override for the Ollama base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP request timeout for remote embeddings (seconds)
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Hashing,
            model: "all-minilm-l6-v2".to_string(),
            dimension: DEFAULT_DIMENSION,
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("embedding.dimension must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("embedding.timeout_secs must be greater than 0".to_string());
        }
        if self.provider != EmbeddingProviderKind::Hashing && self.model.trim().is_empty() {
            return Err("embedding.model must not be empty".to_string());
        }
        Ok(())
    }

    /// Construct the configured model
    pub fn build(&self) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError> {
        self.validate().map_err(EmbeddingError::InvalidInput)?;

        match self.provider {
            EmbeddingProviderKind::Hashing => {
                Ok(Arc::new(HashingEmbeddingModel::new(self.dimension)))
            }
            EmbeddingProviderKind::Ollama => Ok(Arc::new(OllamaEmbeddingModel::new(
                self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
                &self.model,
                self.dimension,
                Duration::from_secs(self.timeout_secs),
            ))),
            #[cfg(feature = "local-embeddings")]
            EmbeddingProviderKind::Local => {
                Ok(Arc::new(crate::local::FastEmbedModel::try_new(&self.model)?))
            }
            #[cfg(not(feature = "local-embeddings"))]
            EmbeddingProviderKind::Local => Err(EmbeddingError::ModelNotLoaded(
                "local embeddings require the `local-embeddings` feature".to_string(),
            )),
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EmbeddingConfig::default();
        assert!(config.validate().is_ok());
        let model = config.build().unwrap();
        assert_eq!(model.dimension(), 384);
        assert_eq!(model.model_name(), "hashing");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = EmbeddingConfig {
            dimension: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(matches!(config.build(), Err(EmbeddingError::InvalidInput(_))));
    }

    #[test]
    fn test_ollama_from_toml() {
        let config = EmbeddingConfig::from_toml(
            r#"
provider = "ollama"
model = "nomic-embed-text"
dimension = 768
"#,
        )
        .unwrap();
        let model = config.build().unwrap();
        assert_eq!(model.dimension(), 768);
        assert_eq!(model.model_name(), "nomic-embed-text");
    }

    #[cfg(not(feature = "local-embeddings"))]
    #[test]
    fn test_local_without_feature() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderKind::Local,
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(EmbeddingError::ModelNotLoaded(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderKind::Ollama,
            dimension: 768,
            ..Default::default()
        };
        let parsed = EmbeddingConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.provider, EmbeddingProviderKind::Ollama);
        assert_eq!(parsed.dimension, 768);
    }
}

//! Configuration for the document pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the DocumentPipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunks retrieved for summarization
    pub summary_top_k: usize,

    /// Chunks retrieved for clause review
    pub review_top_k: usize,

    /// Chunks retrieved per chat question
    pub chat_top_k: usize,

    /// Maximum time for a single language-model call (seconds)
    pub llm_timeout_secs: u64,

    /// Maximum time for embedding a document or a query (seconds)
    pub embedding_timeout_secs: u64,

    /// Prior chat turns rendered into the chat prompt; 0 keeps queries stateless
    pub history_turns: usize,

    /// Reuse built indexes for identical document bytes
    pub cache_indexes: bool,
}

impl PipelineConfig {
    /// Get the language-model timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Get the embedding timeout as a Duration
    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_secs(self.embedding_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.summary_top_k == 0 {
            return Err("summary_top_k must be greater than 0".to_string());
        }
        if self.review_top_k == 0 {
            return Err("review_top_k must be greater than 0".to_string());
        }
        if self.chat_top_k == 0 {
            return Err("chat_top_k must be greater than 0".to_string());
        }
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        if self.embedding_timeout_secs == 0 {
            return Err("embedding_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Default configuration: stateless chat, no index cache
    fn default() -> Self {
        Self {
            summary_top_k: 5,
            review_top_k: 10,
            chat_top_k: 6,
            llm_timeout_secs: 120,
            embedding_timeout_secs: 120,
            history_turns: 0,
            cache_indexes: false,
        }
    }
}

impl PipelineConfig {
    /// Aggressive preset: shorter timeouts, fewer chunks per prompt
    pub fn aggressive() -> Self {
        Self {
            summary_top_k: 3,
            review_top_k: 6,
            chat_top_k: 4,
            llm_timeout_secs: 30,
            embedding_timeout_secs: 30,
            history_turns: 0,
            cache_indexes: false,
        }
    }

    /// Conversational preset: history-aware chat with cached indexes
    pub fn conversational() -> Self {
        Self {
            history_turns: 6,
            cache_indexes: true,
            ..Self::default()
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
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.summary_top_k, 5);
        assert_eq!(config.review_top_k, 10);
        assert_eq!(config.history_turns, 0);
        assert!(!config.cache_indexes);
    }

    #[test]
    fn test_aggressive_config_is_valid() {
        assert!(PipelineConfig::aggressive().validate().is_ok());
    }

    #[test]
    fn test_conversational_config_is_valid() {
        let config = PipelineConfig::conversational();
        assert!(config.validate().is_ok());
        assert!(config.history_turns > 0);
    }

    #[test]
    fn test_invalid_top_k() {
        let mut config = PipelineConfig::default();
        config.review_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = PipelineConfig::default();
        config.llm_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("chat_top_k = 2\ncache_indexes = true\n").unwrap();
        assert_eq!(config.chat_top_k, 2);
        assert!(config.cache_indexes);
        assert_eq!(config.summary_top_k, 5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::conversational();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.history_turns, parsed.history_turns);
        assert_eq!(config.cache_indexes, parsed.cache_indexes);
        assert_eq!(config.llm_timeout_secs, parsed.llm_timeout_secs);
    }
}

//! Error types for the CLI application.

use docintel_extract::ExtractError;
use docintel_llm::LlmError;
use docintel_pipeline::TaskError;
use docintel_store::EmbeddingError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document task failed
    #[error("{0}")]
    Task(#[from] TaskError),

    /// The document could not be loaded
    #[error("{0}")]
    Document(#[from] ExtractError),

    /// The language-model provider could not be set up
    #[error("Gateway setup failed: {0}")]
    Gateway(#[from] LlmError),

    /// The embedding model could not be set up
    #[error("Embedding setup failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

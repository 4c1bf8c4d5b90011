//! Error types for the document pipeline

use docintel_extract::ExtractError;
use docintel_store::VectorIndexError;
use thiserror::Error;

/// Errors that fail a task
///
/// Empty intermediate results are not errors: they come back as advisory
/// strings (summary, chat) or an empty clause list (review).
#[derive(Error, Debug)]
pub enum TaskError {
    /// The file type is neither PDF nor DOCX
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The document could not be read
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Embedding or indexing failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The language-model gateway failed
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A chat question was empty or whitespace
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking worker panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExtractError> for TaskError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(ext) => TaskError::UnsupportedFormat(ext),
            other => TaskError::Extraction(other.to_string()),
        }
    }
}

impl From<VectorIndexError> for TaskError {
    fn from(e: VectorIndexError) -> Self {
        TaskError::Embedding(e.to_string())
    }
}

impl From<tokio::task::JoinError> for TaskError {
    fn from(e: tokio::task::JoinError) -> Self {
        TaskError::Internal(format!("Task join error: {}", e))
    }
}

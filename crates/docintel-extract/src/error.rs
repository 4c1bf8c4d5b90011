//! Error types for text extraction

use docintel_domain::UnsupportedFormat;
use thiserror::Error;

/// Errors that can occur while turning a document into text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file type is neither PDF nor DOCX
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The PDF byte stream could not be parsed at all
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// The DOCX container or its XML could not be read
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// Reading the document from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnsupportedFormat> for ExtractError {
    fn from(err: UnsupportedFormat) -> Self {
        ExtractError::UnsupportedFormat(err.0)
    }
}

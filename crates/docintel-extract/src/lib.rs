//! docintel Text Extraction
//!
//! Converts uploaded documents into plain text. Extraction is deterministic:
//! the same bytes always produce the same text.
//!
//! # Formats
//!
//! - PDF: page text concatenated in page order; unreadable pages contribute nothing
//! - DOCX: paragraphs from `word/document.xml`, each followed by a newline
//!
//! # Examples
//!
//! ```no_run
//! use docintel_extract::{extract_text, load_document};
//!
//! let document = load_document("contract.docx")?;
//! let text = extract_text(&document)?;
//! println!("{}", text);
//! # Ok::<(), docintel_extract::ExtractError>(())
//! ```

#![warn(missing_docs)]

pub mod docx;
pub mod error;
pub mod pdf;

pub use docx::extract_docx;
pub use error::ExtractError;
pub use pdf::extract_pdf;

use docintel_domain::{Document, DocumentFormat};
use std::path::Path;
use tracing::debug;

/// Extract plain text from a document according to its declared format
///
/// Blank output is a valid result (e.g. a scanned PDF); deciding what to do
/// with it is the caller's job.
pub fn extract_text(document: &Document) -> Result<String, ExtractError> {
    let text = match document.format() {
        DocumentFormat::Pdf => extract_pdf(document.bytes())?,
        DocumentFormat::Docx => extract_docx(document.bytes())?,
    };

    debug!(
        format = %document.format(),
        bytes = document.len(),
        chars = text.chars().count(),
        "Extracted document text"
    );

    Ok(text)
}

/// Read a document from disk, deriving its format from the file extension
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, ExtractError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;

    let mut document = Document::new(format, bytes);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        document = document.with_name(name);
    }
    Ok(document)
}

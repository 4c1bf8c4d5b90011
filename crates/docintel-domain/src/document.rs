//! Document module - the unit of work handed to the pipeline

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Declared format of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,

    /// Office Open XML word-processing document
    Docx,
}

impl DocumentFormat {
    /// Get the format tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    /// Parse a format from a file extension, case-insensitively
    ///
    /// A leading dot is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_domain::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_extension("PDF").unwrap(), DocumentFormat::Pdf);
    /// assert_eq!(DocumentFormat::from_extension(".docx").unwrap(), DocumentFormat::Docx);
    /// assert!(DocumentFormat::from_extension("txt").is_err());
    /// ```
    pub fn from_extension(ext: &str) -> Result<Self, UnsupportedFormat> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }

    /// Derive the format from the extension of a path
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

impl FromStr for DocumentFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file type the pipeline cannot read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedFormat(pub String);

impl fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported file type: {}", self.0)
    }
}

impl std::error::Error for UnsupportedFormat {}

/// An uploaded document: raw bytes plus a declared format
///
/// Documents are never mutated by the core. The bytes are reference counted
/// so a document can be handed to blocking workers without copying.
#[derive(Debug, Clone)]
pub struct Document {
    name: Option<String>,
    format: DocumentFormat,
    bytes: Arc<[u8]>,
}

impl Document {
    /// Create a document from bytes and a format tag
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_domain::{Document, DocumentFormat};
    ///
    /// let doc = Document::new(DocumentFormat::Pdf, b"%PDF-1.4".to_vec());
    /// assert_eq!(doc.format(), DocumentFormat::Pdf);
    /// assert_eq!(doc.len(), 8);
    /// ```
    pub fn new(format: DocumentFormat, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            format,
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Attach a display name (typically the uploaded file name)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if one was attached
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared format
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Raw document bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the raw bytes
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the byte stream is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

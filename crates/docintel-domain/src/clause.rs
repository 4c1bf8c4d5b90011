//! Clause module - structured output of clause review

/// Title carried by the sentinel record that reports an unparseable model response
pub const PARSING_ERROR_TITLE: &str = "Parsing Error";

/// A single clause extracted from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseRecord {
    /// Short heading for the clause
    pub title: String,

    /// Clause wording or paraphrase
    pub text: String,
}

impl ClauseRecord {
    /// Create a new clause record
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Sentinel record reporting that the model output could not be parsed
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_domain::ClauseRecord;
    ///
    /// let record = ClauseRecord::parsing_error("expected a JSON array");
    /// assert_eq!(record.title, "Parsing Error");
    /// assert!(record.is_parsing_error());
    /// ```
    pub fn parsing_error(explanation: impl Into<String>) -> Self {
        Self::new(PARSING_ERROR_TITLE, explanation)
    }

    /// Whether this is the parse-failure sentinel
    pub fn is_parsing_error(&self) -> bool {
        self.title == PARSING_ERROR_TITLE
    }
}

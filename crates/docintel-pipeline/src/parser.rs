//! Parse LLM output into clause records
//!
//! Parsing is strict: the response must be a JSON array whose every element
//! is an object with string `title` and `text`. One bad element rejects the
//! whole response.

use docintel_domain::ClauseRecord;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Why a clause response was rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace (or an empty code fence)
    #[error("Empty model response")]
    Empty,

    /// Not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(String),

    /// Valid JSON, but the top level is not an array
    #[error("Expected a JSON array, found {0}")]
    NotArray(&'static str),

    /// An array element does not match `{title, text}`
    #[error("Clause {index}: {reason}")]
    InvalidClause {
        /// Position in the array
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Parse a clause-review response into records
pub fn parse_clauses(response: &str) -> Result<Vec<ClauseRecord>, ParseError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response);
    if json_str.is_empty() {
        return Err(ParseError::Empty);
    }

    let json: Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::Json(e.to_string()))?;

    let items = json
        .as_array()
        .ok_or_else(|| ParseError::NotArray(json_kind(&json)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_clause_json(item).map_err(|reason| ParseError::InvalidClause { index, reason })
        })
        .collect()
}

/// Parse a clause-review response, folding any failure into a sentinel record
///
/// # Examples
///
/// ```
/// use docintel_pipeline::parser::clauses_or_sentinel;
///
/// let clauses = clauses_or_sentinel(r#"[{"title": "Term", "text": "Two years."}]"#);
/// assert_eq!(clauses[0].title, "Term");
///
/// let clauses = clauses_or_sentinel("Sorry, I can't do that.");
/// assert_eq!(clauses.len(), 1);
/// assert!(clauses[0].is_parsing_error());
/// ```
pub fn clauses_or_sentinel(response: &str) -> Vec<ClauseRecord> {
    match parse_clauses(response) {
        Ok(clauses) => clauses,
        Err(e) => {
            warn!(error = %e, "Clause response rejected");
            vec![ClauseRecord::parsing_error(format!(
                "The model response could not be parsed as a clause list ({}).",
                e
            ))]
        }
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the fence line (``` or ```json), then the closing fence if present
        let body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => "",
        };
        body.trim_end().trim_end_matches("```").trim()
    } else {
        trimmed
    }
}

/// Parse a single clause from JSON
fn parse_clause_json(json: &Value) -> Result<ClauseRecord, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", json_kind(json)))?;

    let title = obj
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'title'".to_string())?;

    let text = obj
        .get("text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'text'".to_string())?;

    Ok(ClauseRecord::new(title, text))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

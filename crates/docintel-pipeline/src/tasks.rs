//! Task strategies built on the shared retrieval pipeline
//!
//! Each strategy supplies a retrieval query, a prompt template and an output
//! contract. The pipeline handles everything else. Summaries and answers
//! fall back to advisory strings when there is nothing to work with; clause
//! review falls back to an empty list and folds parse failures into a
//! sentinel record, so its output never fails on model formatting.

use crate::parser::clauses_or_sentinel;
use crate::prompt::{chat_prompt, clause_prompt, summary_prompt, CLAUSE_SCHEMA};
use crate::retriever::RetrievedContext;
use docintel_domain::{ChatTurn, ClauseRecord};

/// Retrieval query used for summaries
pub const SUMMARY_QUERY: &str = "Summarize the entire document.";

/// Retrieval query used for clause review
pub const REVIEW_QUERY: &str = "Extract all legal and policy clauses from the document.";

/// Returned when extraction produced no usable text
pub const NO_TEXT_MESSAGE: &str =
    "Could not extract text from the document. It might be empty or scanned.";

/// Returned when chunking produced nothing
pub const NO_CHUNKS_MESSAGE: &str = "Failed to create text chunks from the document.";

/// Returned when a summary retrieval found nothing
pub const NOTHING_TO_SUMMARIZE_MESSAGE: &str = "Could not find any relevant text to summarize.";

/// Returned when the model produced a blank summary
pub const SUMMARY_FAILED_MESSAGE: &str = "Failed to generate summary.";

/// Returned when a chat retrieval found nothing
pub const NOTHING_TO_ANSWER_MESSAGE: &str =
    "Could not find any relevant text to answer the question.";

/// Returned when the model produced a blank answer
pub const ANSWER_FAILED_MESSAGE: &str = "Failed to generate an answer.";

/// A document task: what to retrieve, how to prompt, how to read the answer
pub trait TaskStrategy {
    /// Task result
    type Output;

    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Text embedded to rank chunks
    fn retrieval_query(&self) -> &str;

    /// Number of chunks to retrieve
    fn top_k(&self) -> usize;

    /// Result when the document has no extractable text
    fn no_text(&self) -> Self::Output;

    /// Result when chunking yields nothing
    fn no_chunks(&self) -> Self::Output;

    /// Result when retrieval yields nothing
    fn nothing_retrieved(&self) -> Self::Output;

    /// Prompt for the language model
    fn prompt(&self, context: &RetrievedContext) -> String;

    /// JSON schema for structured generation; `None` for plain text
    fn schema(&self) -> Option<&'static str> {
        None
    }

    /// Turn the raw model output into the task result
    fn finish(&self, raw: String) -> Self::Output;
}

/// Concise 150-200 word summary of the document
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    top_k: usize,
}

impl Summarizer {
    /// Summarizer retrieving `top_k` chunks
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }
}

impl TaskStrategy for Summarizer {
    type Output = String;

    fn name(&self) -> &'static str {
        "summarize"
    }

    fn retrieval_query(&self) -> &str {
        SUMMARY_QUERY
    }

    fn top_k(&self) -> usize {
        self.top_k
    }

    fn no_text(&self) -> String {
        NO_TEXT_MESSAGE.to_string()
    }

    fn no_chunks(&self) -> String {
        NO_CHUNKS_MESSAGE.to_string()
    }

    fn nothing_retrieved(&self) -> String {
        NOTHING_TO_SUMMARIZE_MESSAGE.to_string()
    }

    fn prompt(&self, context: &RetrievedContext) -> String {
        summary_prompt(&context.to_prompt_context())
    }

    fn finish(&self, raw: String) -> String {
        non_blank_or(raw, SUMMARY_FAILED_MESSAGE)
    }
}

/// Key-clause extraction as a list of `{title, text}` records
#[derive(Debug, Clone, Copy)]
pub struct ClauseReviewer {
    top_k: usize,
}

impl ClauseReviewer {
    /// Reviewer retrieving `top_k` chunks
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }
}

impl TaskStrategy for ClauseReviewer {
    type Output = Vec<ClauseRecord>;

    fn name(&self) -> &'static str {
        "review"
    }

    fn retrieval_query(&self) -> &str {
        REVIEW_QUERY
    }

    fn top_k(&self) -> usize {
        self.top_k
    }

    fn no_text(&self) -> Vec<ClauseRecord> {
        Vec::new()
    }

    fn no_chunks(&self) -> Vec<ClauseRecord> {
        Vec::new()
    }

    fn nothing_retrieved(&self) -> Vec<ClauseRecord> {
        Vec::new()
    }

    fn prompt(&self, context: &RetrievedContext) -> String {
        clause_prompt(&context.to_prompt_context())
    }

    fn schema(&self) -> Option<&'static str> {
        Some(CLAUSE_SCHEMA)
    }

    fn finish(&self, raw: String) -> Vec<ClauseRecord> {
        clauses_or_sentinel(&raw)
    }
}

/// Direct answer to a question about the document
///
/// Retrieval always uses the live question alone. `history` only reaches
/// the prompt when the caller passes a non-empty window.
#[derive(Debug, Clone, Copy)]
pub struct DocumentQuery<'a> {
    question: &'a str,
    history: &'a [ChatTurn],
    top_k: usize,
}

impl<'a> DocumentQuery<'a> {
    /// Query for `question`, rendering `history` into the prompt
    pub fn new(question: &'a str, history: &'a [ChatTurn], top_k: usize) -> Self {
        Self {
            question,
            history,
            top_k,
        }
    }
}

impl TaskStrategy for DocumentQuery<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "query"
    }

    fn retrieval_query(&self) -> &str {
        self.question
    }

    fn top_k(&self) -> usize {
        self.top_k
    }

    fn no_text(&self) -> String {
        NO_TEXT_MESSAGE.to_string()
    }

    fn no_chunks(&self) -> String {
        NO_CHUNKS_MESSAGE.to_string()
    }

    fn nothing_retrieved(&self) -> String {
        NOTHING_TO_ANSWER_MESSAGE.to_string()
    }

    fn prompt(&self, context: &RetrievedContext) -> String {
        chat_prompt(&context.to_prompt_context(), self.question, self.history)
    }

    fn finish(&self, raw: String) -> String {
        non_blank_or(raw, ANSWER_FAILED_MESSAGE)
    }
}

fn non_blank_or(raw: String, fallback: &str) -> String {
    if raw.trim().is_empty() {
        fallback.to_string()
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_blank_output() {
        let task = Summarizer::new(5);
        assert_eq!(task.finish("  \n".to_string()), SUMMARY_FAILED_MESSAGE);
        assert_eq!(task.finish("A summary.".to_string()), "A summary.");
        assert!(task.schema().is_none());
    }

    #[test]
    fn test_reviewer_empty_results_are_empty_lists() {
        let task = ClauseReviewer::new(10);
        assert!(task.no_text().is_empty());
        assert!(task.no_chunks().is_empty());
        assert!(task.nothing_retrieved().is_empty());
        assert_eq!(task.schema(), Some(CLAUSE_SCHEMA));
    }

    #[test]
    fn test_reviewer_never_fails_on_bad_output() {
        let task = ClauseReviewer::new(10);
        let clauses = task.finish("I found these clauses: ...".to_string());
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].is_parsing_error());
    }

    #[test]
    fn test_query_retrieves_on_question() {
        let history = [ChatTurn::user("earlier"), ChatTurn::assistant("reply")];
        let task = DocumentQuery::new("What is the deposit?", &history, 6);
        assert_eq!(task.retrieval_query(), "What is the deposit?");
        assert_eq!(task.nothing_retrieved(), NOTHING_TO_ANSWER_MESSAGE);
        assert_eq!(task.finish(String::new()), ANSWER_FAILED_MESSAGE);
    }
}

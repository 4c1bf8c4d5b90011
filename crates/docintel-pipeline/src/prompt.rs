//! LLM prompt templates for the three document tasks

use docintel_domain::{ChatTurn, Role};

/// JSON schema the clause reviewer asks the model to follow
pub const CLAUSE_SCHEMA: &str = r#"{"type":"array","items":{"type":"object","properties":{"title":{"type":"string"},"text":{"type":"string"}},"required":["title","text"]}}"#;

const SUMMARY_INSTRUCTIONS: &str = "Based on the provided document, please generate a concise summary.
The summary should be between 150 and 200 words.
Focus on the main points, key arguments, and conclusions.

Document context is provided below.";

const CLAUSE_INSTRUCTIONS: &str = "You are reviewing a legal or policy document.
Identify every distinct clause in the document context below: obligations, rights,
terms, conditions, restrictions, termination, liability, payment, confidentiality,
governing law and similar provisions.

For each clause give a short title and the clause text (quoted or closely paraphrased).";

const CLAUSE_FORMAT: &str = "OUTPUT FORMAT:
Respond with a JSON array only. No prose, no markdown, no code fences.
Each element must be an object with exactly two string fields:
  \"title\": short name of the clause
  \"text\": the clause wording
If the document contains no clauses, respond with [].

Example:
[{\"title\": \"Termination\", \"text\": \"Either party may terminate with 30 days written notice.\"}]";

const CHAT_INSTRUCTIONS: &str = "Answer the question directly using only the document context below.
If the context does not contain the answer, say that the document does not cover it.";

/// Summarization prompt over the retrieved context
pub fn summary_prompt(context: &str) -> String {
    format!(
        "{}\n\nCONTEXT:\n{}\n\nSUMMARY:\n",
        SUMMARY_INSTRUCTIONS, context
    )
}

/// Clause-extraction prompt with embedded output-format instructions
pub fn clause_prompt(context: &str) -> String {
    format!(
        "{}\n\n{}\n\nJSON schema:\n{}\n\nCONTEXT:\n{}\n\nCLAUSES (JSON array):\n",
        CLAUSE_INSTRUCTIONS, CLAUSE_FORMAT, CLAUSE_SCHEMA, context
    )
}

/// Direct-answer prompt for a chat question
///
/// `history` is rendered as a conversation block when non-empty.
pub fn chat_prompt(context: &str, question: &str, history: &[ChatTurn]) -> String {
    let mut prompt = String::new();
    prompt.push_str(CHAT_INSTRUCTIONS);
    prompt.push_str("\n\n");

    if !history.is_empty() {
        prompt.push_str("CONVERSATION SO FAR:\n");
        for turn in history {
            let speaker = match turn.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, turn.text));
        }
        prompt.push('\n');
    }

    prompt.push_str("CONTEXT:\n");
    prompt.push_str(context);
    prompt.push_str("\n\nQUESTION:\n");
    prompt.push_str(question);
    prompt.push_str("\n\nANSWER:\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_shape() {
        let prompt = summary_prompt("chunk one\n\nchunk two");
        assert!(prompt.contains("between 150 and 200 words"));
        assert!(prompt.contains("main points, key arguments, and conclusions"));
        assert!(prompt.contains("CONTEXT:\nchunk one\n\nchunk two"));
        assert!(prompt.trim_end().ends_with("SUMMARY:"));
    }

    #[test]
    fn test_clause_prompt_embeds_schema() {
        let prompt = clause_prompt("The tenant shall pay rent.");
        assert!(prompt.contains(CLAUSE_SCHEMA));
        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("\"title\""));
        assert!(prompt.contains("The tenant shall pay rent."));
    }

    #[test]
    fn test_clause_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CLAUSE_SCHEMA).unwrap();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["required"][1], "text");
    }

    #[test]
    fn test_chat_prompt_without_history() {
        let prompt = chat_prompt("ctx", "Who signs?", &[]);
        assert!(!prompt.contains("CONVERSATION SO FAR"));
        assert!(prompt.contains("QUESTION:\nWho signs?"));
    }

    #[test]
    fn test_chat_prompt_with_history() {
        let history = vec![ChatTurn::user("Who signs?"), ChatTurn::assistant("The tenant.")];
        let prompt = chat_prompt("ctx", "When?", &history);

        let conversation = prompt.find("CONVERSATION SO FAR:").unwrap();
        let context = prompt.find("CONTEXT:").unwrap();
        assert!(conversation < context);
        assert!(prompt.contains("User: Who signs?\nAssistant: The tenant.\n"));
    }
}

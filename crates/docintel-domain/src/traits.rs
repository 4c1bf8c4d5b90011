//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the
//! outside world. Implementations live in other crates.

/// Trait for language-model providers
///
/// Implemented by the infrastructure layer (docintel-llm). Calls are
/// synchronous; async callers run them on a blocking worker.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a plain-text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output constrained to JSON matching `schema`, where supported
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str {
        "llm"
    }
}

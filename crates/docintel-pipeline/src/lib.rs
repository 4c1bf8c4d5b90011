//! docintel Document Pipeline
//!
//! Retrieval-augmented summarization, clause review and question answering
//! over a single PDF or DOCX document.
//!
//! # Architecture
//!
//! ```text
//! Document → Extract → Chunk → Embed/Index → Retrieve → Prompt → LLM → Result
//! ```
//!
//! Each task is a [`TaskStrategy`]: a retrieval query, a `k`, a prompt
//! template and a way to read the model's answer. [`DocumentPipeline`] runs
//! the shared flow for all of them.
//!
//! # Example Usage
//!
//! ```no_run
//! use docintel_pipeline::{DocumentPipeline, PipelineConfig};
//! use docintel_llm::MockProvider;
//! use docintel_store::HashingEmbeddingModel;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("A short summary.");
//! let embedder = Arc::new(HashingEmbeddingModel::default());
//! let pipeline = DocumentPipeline::new(llm, embedder, PipelineConfig::default())?;
//!
//! let document = docintel_extract::load_document("contract.pdf")?;
//!
//! let summary = pipeline.summarize(&document).await?;
//! let clauses = pipeline.review(&document).await?;
//! let answer = pipeline.query(&document, "When does the lease end?", &[]).await?;
//!
//! println!("{}\n{} clauses\n{}", summary, clauses.len(), answer);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod chunking;
mod config;
mod error;
pub mod parser;
mod pipeline;
mod prompt;
mod retriever;
mod tasks;


pub use cache::{document_key, IndexCache, DEFAULT_CACHE_ENTRIES};
pub use chunking::{TextChunker, CHUNK_OVERLAP, CHUNK_SIZE};
pub use config::PipelineConfig;
pub use error::TaskError;
pub use pipeline::DocumentPipeline;
pub use prompt::{chat_prompt, clause_prompt, summary_prompt, CLAUSE_SCHEMA};
pub use retriever::{RetrievedContext, Retriever, CONTEXT_SEPARATOR};
pub use tasks::{
    ClauseReviewer, DocumentQuery, Summarizer, TaskStrategy, ANSWER_FAILED_MESSAGE,
    NOTHING_TO_ANSWER_MESSAGE, NOTHING_TO_SUMMARIZE_MESSAGE, NO_CHUNKS_MESSAGE, NO_TEXT_MESSAGE,
    REVIEW_QUERY, SUMMARY_FAILED_MESSAGE, SUMMARY_QUERY,
};

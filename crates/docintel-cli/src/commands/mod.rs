//! Command implementations.

pub mod ask;
pub mod config;
pub mod review;
pub mod summarize;

pub use self::ask::execute_ask;
pub use self::config::execute_config;
pub use self::review::execute_review;
pub use self::summarize::execute_summarize;

use crate::config::Config;
use crate::error::Result;
use docintel_domain::Document;
use docintel_llm::ConfiguredProvider;
use docintel_pipeline::DocumentPipeline;
use std::path::Path;
use tracing::debug;

/// Pipeline driven by the configured gateway.
pub type Pipeline = DocumentPipeline<ConfiguredProvider>;

/// Build the pipeline described by `config`.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let llm = config.gateway.build()?;
    let embedder = config.embedding.build()?;
    debug!(
        provider = %config.gateway.provider,
        model = %config.gateway.model,
        embedding = embedder.model_name(),
        "Building pipeline"
    );
    Ok(DocumentPipeline::new(llm, embedder, config.pipeline.clone())?)
}

/// Load a document from disk.
pub fn open_document(path: &Path) -> Result<Document> {
    Ok(docintel_extract::load_document(path)?)
}

/// Display name for a document.
pub fn display_name(document: &Document, path: &Path) -> String {
    document
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

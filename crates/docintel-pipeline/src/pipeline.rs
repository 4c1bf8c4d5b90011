//! DocumentPipeline: extract, chunk, index, retrieve, generate

use crate::cache::{document_key, IndexCache};
use crate::chunking::TextChunker;
use crate::config::PipelineConfig;
use crate::error::TaskError;
use crate::retriever::Retriever;
use crate::tasks::{ClauseReviewer, DocumentQuery, Summarizer, TaskStrategy};
use docintel_domain::traits::LlmProvider;
use docintel_domain::{ChatSession, ChatTurn, ClauseRecord, Document};
use docintel_store::{EmbeddingModel, VectorIndex};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Result of preparing a document for retrieval
enum Prepared {
    Index(Arc<VectorIndex>),
    NoText,
    NoChunks,
}

/// Runs document tasks against a language model and an embedding model
///
/// Every call rebuilds the document's index unless `cache_indexes` is set.
/// The pipeline holds no per-request state, so one instance can serve
/// concurrent calls.
pub struct DocumentPipeline<L>
where
    L: LlmProvider,
{
    llm: Arc<L>,
    embedder: Arc<dyn EmbeddingModel>,
    chunker: TextChunker,
    config: PipelineConfig,
    cache: Option<IndexCache>,
}

impl<L> DocumentPipeline<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a pipeline, rejecting an invalid configuration
    pub fn new(
        llm: L,
        embedder: Arc<dyn EmbeddingModel>,
        config: PipelineConfig,
    ) -> Result<Self, TaskError> {
        config.validate().map_err(TaskError::Config)?;

        let cache = config.cache_indexes.then(IndexCache::default);

        Ok(Self {
            llm: Arc::new(llm),
            embedder,
            chunker: TextChunker::default(),
            config,
            cache,
        })
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The language-model provider
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// The index cache, when enabled
    pub fn cache(&self) -> Option<&IndexCache> {
        self.cache.as_ref()
    }

    /// Forget any cached index for `document`
    pub fn invalidate(&self, document: &Document) -> bool {
        self.cache
            .as_ref()
            .map(|cache| cache.invalidate(document))
            .unwrap_or(false)
    }

    /// Summarize a document in 150-200 words
    pub async fn summarize(&self, document: &Document) -> Result<String, TaskError> {
        self.run(document, &Summarizer::new(self.config.summary_top_k))
            .await
    }

    /// Extract the document's clauses
    ///
    /// A malformed model response comes back as a single "Parsing Error"
    /// record, never as an error.
    pub async fn review(&self, document: &Document) -> Result<Vec<ClauseRecord>, TaskError> {
        self.run(document, &ClauseReviewer::new(self.config.review_top_k))
            .await
    }

    /// Answer a question about a document
    ///
    /// Only the last `history_turns` entries of `history` reach the prompt;
    /// with the default of 0 the answer depends on the question alone.
    pub async fn query(
        &self,
        document: &Document,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<String, TaskError> {
        if question.trim().is_empty() {
            return Err(TaskError::EmptyQuestion);
        }

        let window = &history[history.len().saturating_sub(self.config.history_turns)..];
        let task = DocumentQuery::new(question, window, self.config.chat_top_k);
        self.run(document, &task).await
    }

    /// Answer a question and record the exchange in `session`
    pub async fn chat(
        &self,
        document: &Document,
        session: &mut ChatSession,
        question: &str,
    ) -> Result<String, TaskError> {
        let answer = self.query(document, question, session.turns()).await?;
        session.record_exchange(question, answer.clone());
        Ok(answer)
    }

    /// Shared flow for every task strategy
    async fn run<T: TaskStrategy>(
        &self,
        document: &Document,
        task: &T,
    ) -> Result<T::Output, TaskError> {
        info!(
            task = task.name(),
            document = document.name().unwrap_or("<unnamed>"),
            format = %document.format(),
            bytes = document.len(),
            "Starting task"
        );

        let index = match self.prepare(document).await? {
            Prepared::Index(index) => index,
            Prepared::NoText => {
                info!(task = task.name(), "No extractable text");
                return Ok(task.no_text());
            }
            Prepared::NoChunks => {
                warn!(task = task.name(), "Chunking produced nothing");
                return Ok(task.no_chunks());
            }
        };

        let query = task.retrieval_query().to_string();
        let k = task.top_k();
        let context = timeout(
            self.config.embedding_timeout(),
            tokio::task::spawn_blocking(move || Retriever::new(&index).retrieve(&query, k)),
        )
        .await
        .map_err(|_| TaskError::Embedding("Query embedding timed out".to_string()))???;

        if context.is_empty() {
            info!(task = task.name(), "Nothing retrieved");
            return Ok(task.nothing_retrieved());
        }
        debug!(task = task.name(), chunks = ?context.chunk_indices(), "Retrieved context");

        let prompt = task.prompt(&context);
        debug!("Prompt length: {} chars", prompt.len());

        let raw = timeout(
            self.config.llm_timeout(),
            self.call_llm(prompt, task.schema()),
        )
        .await
        .map_err(|_| TaskError::Gateway("Language model call timed out".to_string()))??;

        debug!("LLM response length: {} chars", raw.len());
        info!(task = task.name(), "Task complete");

        Ok(task.finish(raw))
    }

    /// Extract, chunk and index a document, consulting the cache if enabled
    async fn prepare(&self, document: &Document) -> Result<Prepared, TaskError> {
        let key = self.cache.as_ref().map(|_| document_key(document));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(index) = cache.get(key) {
                debug!(key = %key, "Index cache hit");
                return Ok(Prepared::Index(index));
            }
        }

        let doc = document.clone();
        let text = tokio::task::spawn_blocking(move || docintel_extract::extract_text(&doc)).await??;

        if text.trim().is_empty() {
            return Ok(Prepared::NoText);
        }

        let chunks = self.chunker.chunk(&text);
        if chunks.is_empty() {
            return Ok(Prepared::NoChunks);
        }
        info!(chars = text.chars().count(), chunks = chunks.len(), "Split text into chunks");

        let embedder = Arc::clone(&self.embedder);
        let index = timeout(
            self.config.embedding_timeout(),
            tokio::task::spawn_blocking(move || VectorIndex::build(chunks, embedder)),
        )
        .await
        .map_err(|_| TaskError::Embedding("Document embedding timed out".to_string()))???;
        let index = Arc::new(index);

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, Arc::clone(&index));
        }

        Ok(Prepared::Index(index))
    }

    /// Call the provider on a blocking thread; the provider itself is synchronous
    async fn call_llm(&self, prompt: String, schema: Option<&'static str>) -> Result<String, TaskError> {
        let llm = Arc::clone(&self.llm);

        tokio::task::spawn_blocking(move || {
            let result = match schema {
                Some(schema) => llm.generate_structured(&prompt, schema),
                None => llm.generate(&prompt),
            };
            result.map_err(|e| TaskError::Gateway(e.to_string()))
        })
        .await?
    }
}

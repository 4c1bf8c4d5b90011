//! Retrieval of prompt context from a document's vector index

use docintel_store::{ScoredChunk, VectorIndex, VectorIndexError};

/// Separator placed between retrieved chunks in the prompt context
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// The chunks judged most relevant to a query, best first
#[derive(Debug, Clone, Default)]
pub struct RetrievedContext {
    chunks: Vec<ScoredChunk>,
}

impl RetrievedContext {
    /// Wrap already-ranked chunks
    pub fn new(chunks: Vec<ScoredChunk>) -> Self {
        Self { chunks }
    }

    /// Ranked chunks
    pub fn chunks(&self) -> &[ScoredChunk] {
        &self.chunks
    }

    /// Chunk indices in rank order
    pub fn chunk_indices(&self) -> Vec<usize> {
        self.chunks.iter().map(|c| c.chunk.index).collect()
    }

    /// Number of retrieved chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing was retrieved
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk texts joined with the context separator, in rank order
    pub fn to_prompt_context(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }
}

/// Runs task queries against a vector index
pub struct Retriever<'a> {
    index: &'a VectorIndex,
}

impl<'a> Retriever<'a> {
    /// Create a retriever over `index`
    pub fn new(index: &'a VectorIndex) -> Self {
        Self { index }
    }

    /// Retrieve the top `k` chunks for `query`
    pub fn retrieve(&self, query: &str, k: usize) -> Result<RetrievedContext, VectorIndexError> {
        Ok(RetrievedContext::new(self.index.query(query, k)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docintel_domain::Chunk;
    use docintel_store::HashingEmbeddingModel;
    use std::sync::Arc;

    fn index(texts: &[&str]) -> VectorIndex {
        let chunks = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk {
                index: i,
                text: t.to_string(),
                start: 0,
                end: t.chars().count(),
                overlap: 0,
            })
            .collect();
        VectorIndex::build(chunks, Arc::new(HashingEmbeddingModel::default())).unwrap()
    }

    #[test]
    fn test_context_joined_in_rank_order() {
        let index = index(&["cats purr softly", "dogs bark loudly", "dogs and cats"]);
        let context = Retriever::new(&index).retrieve("dogs bark", 2).unwrap();

        assert_eq!(context.len(), 2);
        assert_eq!(context.chunk_indices()[0], 1);
        assert!(context.to_prompt_context().starts_with("dogs bark loudly\n\n"));
    }

    #[test]
    fn test_empty_index_gives_empty_context() {
        let index = index(&[]);
        let context = Retriever::new(&index).retrieve("anything", 5).unwrap();
        assert!(context.is_empty());
        assert_eq!(context.to_prompt_context(), "");
    }
}

//! Exact Cosine Vector Index
//!
//! An ephemeral, in-memory index over one document's chunks. Search is a
//! brute-force scan: documents yield at most a few thousand chunks, and an
//! exact scan gives a stable, reproducible ranking.
//!
//! # Ranking
//!
//! - Results are ordered by descending cosine similarity
//! - Equal scores keep chunk order (stable sort), so earlier chunks win ties
//! - `k` is clamped to the number of indexed chunks

use crate::embedding::{cosine_similarity, EmbeddingError, EmbeddingModel};
use docintel_domain::Chunk;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during vector index operations
#[derive(Error, Debug)]
pub enum VectorIndexError {
    /// Invalid embedding dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },

    /// The embedding model failed
    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// A chunk paired with its similarity to a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,

    /// Cosine similarity to the query
    pub score: f32,
}

/// In-memory list of (chunk, vector) pairs for a single document
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use docintel_domain::Chunk;
/// use docintel_store::{HashingEmbeddingModel, VectorIndex};
///
/// let chunks = vec![
///     Chunk { index: 0, text: "rent is due monthly".into(), start: 0, end: 19, overlap: 0 },
///     Chunk { index: 1, text: "pets are not allowed".into(), start: 19, end: 39, overlap: 0 },
/// ];
/// let index = VectorIndex::build(chunks, Arc::new(HashingEmbeddingModel::default())).unwrap();
///
/// let hits = index.query("are pets allowed", 1).unwrap();
/// assert_eq!(hits[0].chunk.index, 1);
/// ```
pub struct VectorIndex {
    model: Arc<dyn EmbeddingModel>,
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Embed every chunk and build the index
    pub fn build(
        chunks: Vec<Chunk>,
        model: Arc<dyn EmbeddingModel>,
    ) -> Result<Self, VectorIndexError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = model.embed_batch(&texts)?;

        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::InferenceFailed(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            ))
            .into());
        }

        let expected = model.dimension();
        for vector in &vectors {
            check_dimension(expected, vector)?;
        }

        debug!(
            chunks = chunks.len(),
            dimension = expected,
            model = model.model_name(),
            "Built vector index"
        );

        Ok(Self {
            model,
            chunks,
            vectors,
        })
    }

    /// Return the `k` chunks most similar to `text`, best first
    ///
    /// An empty index answers `[]` without embedding the query.
    pub fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>, VectorIndexError> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query = self.model.embed(text)?;
        check_dimension(self.model.dimension(), &query)?;
        Ok(self.search(&query, k))
    }

    /// Rank chunks against an already-embedded query
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(query, v)))
            .collect();

        // Stable: ties keep ascending chunk order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(k.min(self.chunks.len()))
            .map(|(i, score)| ScoredChunk {
                chunk: self.chunks[i].clone(),
                score,
            })
            .collect()
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Indexed chunks in document order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

fn check_dimension(expected: usize, vector: &[f32]) -> Result<(), VectorIndexError> {
    if vector.len() != expected {
        return Err(VectorIndexError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbeddingModel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            text: text.to_string(),
            start: index * 100,
            end: index * 100 + text.chars().count(),
            overlap: 0,
        }
    }

    fn hashing() -> Arc<dyn EmbeddingModel> {
        Arc::new(HashingEmbeddingModel::new(256))
    }

    /// Counts calls and can be told to emit the wrong dimension
    struct ProbeModel {
        calls: AtomicUsize,
        dimension: usize,
        emit: usize,
    }

    impl EmbeddingModel for ProbeModel {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0; self.emit])
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            "probe"
        }
    }

    struct FailingModel;

    impl EmbeddingModel for FailingModel {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::InferenceFailed("boom".to_string()))
        }

        fn dimension(&self) -> usize {
            4
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_best_match_first() {
        let index = VectorIndex::build(
            vec![
                chunk(0, "The tenant pays rent on the first of each month."),
                chunk(1, "Either party may terminate with thirty days notice."),
                chunk(2, "The landlord maintains the roof and plumbing."),
            ],
            hashing(),
        )
        .unwrap();

        let hits = index.query("terminate notice", 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.index, 1);
        assert!(hits[0].score >= hits[1].score);
        assert!(hits[1].score >= hits[2].score);
    }

    #[test]
    fn test_ties_prefer_earlier_chunk() {
        let index = VectorIndex::build(
            vec![
                chunk(0, "identical text"),
                chunk(1, "something else entirely"),
                chunk(2, "identical text"),
            ],
            hashing(),
        )
        .unwrap();

        let hits = index.query("identical text", 2).unwrap();
        assert_eq!(hits[0].chunk.index, 0);
        assert_eq!(hits[1].chunk.index, 2);
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn test_k_is_clamped() {
        let index = VectorIndex::build(vec![chunk(0, "a b"), chunk(1, "c d")], hashing()).unwrap();
        assert_eq!(index.query("a", 50).unwrap().len(), 2);
        assert!(index.query("a", 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_index_skips_query_embedding() {
        let model = Arc::new(ProbeModel {
            calls: AtomicUsize::new(0),
            dimension: 3,
            emit: 3,
        });
        let index = VectorIndex::build(Vec::new(), model.clone()).unwrap();

        assert!(index.is_empty());
        assert!(index.query("anything", 5).unwrap().is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dimension_mismatch_on_build() {
        let model = Arc::new(ProbeModel {
            calls: AtomicUsize::new(0),
            dimension: 4,
            emit: 3,
        });
        let result = VectorIndex::build(vec![chunk(0, "x")], model);
        assert!(matches!(
            result,
            Err(VectorIndexError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let result = VectorIndex::build(vec![chunk(0, "x")], Arc::new(FailingModel));
        assert!(matches!(result, Err(VectorIndexError::Embedding(_))));
    }

    #[test]
    fn test_search_with_precomputed_query() {
        let model = hashing();
        let index = VectorIndex::build(
            vec![chunk(0, "alpha beta"), chunk(1, "gamma delta")],
            model.clone(),
        )
        .unwrap();

        let query = model.embed("gamma").unwrap();
        let hits = index.search(&query, 1);
        assert_eq!(hits[0].chunk.text, "gamma delta");
        assert_eq!(index.chunks().len(), 2);
    }
}

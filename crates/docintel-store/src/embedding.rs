//! Embedding Model for Text Vectorization
//!
//! This module provides text-to-vector conversion for semantic retrieval.
//!
//! # Architecture
//!
//! - **HashingEmbeddingModel**: feature-hashed bag of words, offline and deterministic
//! - **OllamaEmbeddingModel**: remote embeddings from an Ollama server (`remote` module)
//! - **FastEmbedModel**: local all-MiniLM-L6-v2 behind the `local-embeddings` feature
//!
//! # Examples
//!
//! ```rust
//! use docintel_store::embedding::{HashingEmbeddingModel, EmbeddingModel};
//!
//! let model = HashingEmbeddingModel::new(384);
//! let text = "The sky is blue";
//! let embedding = model.embed(text).unwrap();
//! assert_eq!(embedding.len(), 384);
//!
//! // Same text always produces same embedding
//! let embedding2 = model.embed(text).unwrap();
//! assert_eq!(embedding, embedding2);
//! ```

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Model not loaded
    #[error("Embedding model not loaded: {0}")]
    ModelNotLoaded(String),

    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),

    /// Remote embedding service unreachable or failing
    #[error("Communication error: {0}")]
    Communication(String),
}

/// Trait for embedding models
///
/// Implementations must be deterministic: the same text always yields the
/// same vector, and every vector has length `dimension()`.
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;

    /// Embed several texts at once, in order
    ///
    /// The default embeds one text at a time; models with a native batch
    /// path override it.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Default dimension, matching all-MiniLM-L6-v2
pub const DEFAULT_DIMENSION: usize = 384;

/// Feature-hashed bag-of-words embeddings
///
/// Each lowercase alphanumeric token is hashed to a bucket and a sign; the
/// bucket counts are then normalized to unit length. Texts that share words
/// point in similar directions, which is enough for lexical retrieval in
/// tests and offline runs. Text without any word characters maps to the zero
/// vector, which is orthogonal to everything. Buckets come from SHA-256, so a
/// given text embeds to the same vector on every build.
pub struct HashingEmbeddingModel {
    dimension: usize,
}

impl HashingEmbeddingModel {
    /// Create a new hashing model
    ///
    /// # Parameters
    ///
    /// - `dimension`: Number of hash buckets (e.g., 384)
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Bucket and sign from the first eight bytes of the token's SHA-256
    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let hash = u64::from_be_bytes(head);
        let index = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Default for HashingEmbeddingModel {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingModel for HashingEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut embedding = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let (index, sign) = self.bucket(&token.to_lowercase());
            embedding[index] += sign;
        }

        normalize(&mut embedding);
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "hashing"
    }
}

/// Scale a vector to unit length in place; the zero vector is left alone
pub fn normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in vector.iter_mut() {
            *value /= magnitude;
        }
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// # Returns
///
/// Cosine similarity in range [-1, 1], where:
/// - 1.0 = identical direction
/// - 0.0 = orthogonal (or either vector is zero)
/// - -1.0 = opposite direction
///
/// Vectors of different length compare over their common prefix; callers
/// check dimensions beforehand.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_embedding_deterministic() {
        let model = HashingEmbeddingModel::new(384);

        let text = "The quick brown fox jumps over the lazy dog";
        let embedding1 = model.embed(text).unwrap();
        let embedding2 = model.embed(text).unwrap();

        assert_eq!(embedding1, embedding2, "Same text should produce same embedding");
    }

    #[test]
    fn test_hashing_embedding_dimension() {
        let model = HashingEmbeddingModel::new(128);

        let embedding = model.embed("test").unwrap();
        assert_eq!(embedding.len(), 128);
        assert_eq!(model.dimension(), 128);
    }

    #[test]
    fn test_hashing_embedding_normalized() {
        let model = HashingEmbeddingModel::default();

        let embedding = model.embed("test text").unwrap();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001, "Embedding should be normalized");
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let model = HashingEmbeddingModel::default();

        let a = model.embed("Termination, notice!").unwrap();
        let b = model.embed("termination notice").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_words_score_higher() {
        let model = HashingEmbeddingModel::default();

        let query = model.embed("apple harvest").unwrap();
        let related = model.embed("The apple harvest was early this year").unwrap();
        let unrelated = model.embed("Volcanic eruptions reshape islands").unwrap();

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_buckets_are_pinned() {
        // First eight bytes of sha256("rent"), big-endian, mod 384 is 380; top bit clear
        let model = HashingEmbeddingModel::new(384);
        let embedding = model.embed("Rent").unwrap();
        assert_eq!(embedding[380], 1.0);
        assert_eq!(embedding.iter().filter(|v| **v != 0.0).count(), 1);
    }

    #[test]
    fn test_wordless_text_is_zero_vector() {
        let model = HashingEmbeddingModel::new(16);
        let embedding = model.embed("  --- ").unwrap();
        assert!(embedding.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_default_batch_matches_single() {
        let model = HashingEmbeddingModel::new(64);
        let batch = model.embed_batch(&["one", "two"]).unwrap();
        assert_eq!(batch[0], model.embed("one").unwrap());
        assert_eq!(batch[1], model.embed("two").unwrap());
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec, &vec);
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![0.0, 1.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![-1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!((similarity + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}

//! docintel Retrieval Store
//!
//! Embedding models and the per-document vector index used for retrieval.
//!
//! # Architecture
//!
//! - `EmbeddingModel` trait with hashing, Ollama and (optionally) fastembed backends
//! - `VectorIndex`: exact cosine kNN over one document's chunks, never persisted
//!
//! # Examples
//!
//! ```
//! use docintel_store::{EmbeddingConfig, VectorIndex};
//!
//! let model = EmbeddingConfig::default().build().unwrap();
//! let index = VectorIndex::build(Vec::new(), model).unwrap();
//! assert!(index.query("anything", 5).unwrap().is_empty());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod embedding;
#[cfg(feature = "local-embeddings")]
pub mod local;
pub mod remote;
pub mod vector_index;

pub use config::{EmbeddingConfig, EmbeddingProviderKind};
pub use embedding::{cosine_similarity, EmbeddingError, EmbeddingModel, HashingEmbeddingModel};
#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedModel;
pub use remote::OllamaEmbeddingModel;
pub use vector_index::{ScoredChunk, VectorIndex, VectorIndexError};

//! Local sentence embeddings via fastembed (ONNX Runtime)

use crate::embedding::{EmbeddingError, EmbeddingModel};
use std::sync::Mutex;
use tracing::info;

/// all-MiniLM-L6-v2 (or another supported model) running in-process
///
/// fastembed's `embed` needs `&mut self`, so the model sits behind a mutex.
pub struct FastEmbedModel {
    name: String,
    dimension: usize,
    model: Mutex<fastembed::TextEmbedding>,
}

fn resolve(name: &str) -> Result<(fastembed::EmbeddingModel, usize), EmbeddingError> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok((fastembed::EmbeddingModel::AllMiniLML6V2, 384)),
        "bge-small-en-v1.5" => Ok((fastembed::EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((fastembed::EmbeddingModel::BGEBaseENV15, 768)),
        other => Err(EmbeddingError::ModelNotLoaded(format!(
            "unknown local embedding model '{}'",
            other
        ))),
    }
}

impl FastEmbedModel {
    /// Load (downloading on first use) the named model
    pub fn try_new(name: &str) -> Result<Self, EmbeddingError> {
        let (model_kind, dimension) = resolve(name)?;
        info!(model = name, "Loading local embedding model");

        let model = fastembed::TextEmbedding::try_new(fastembed::InitOptions::new(model_kind))
            .map_err(|e| EmbeddingError::ModelNotLoaded(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            dimension,
            model: Mutex::new(model),
        })
    }
}

impl EmbeddingModel for FastEmbedModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed("no embedding returned".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| EmbeddingError::ModelNotLoaded("model lock poisoned".to_string()))?;
        model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingError::InferenceFailed(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

//! Model2Vec static-embedding backend

use crate::config::Config;
use crate::embedding::capability::EmbeddingCapability;
use crate::error::Result;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_id: String,
}

impl Model2VecEmbedder {
    /// Load a Model2Vec model from a local directory.
    pub fn load(model_path: &Path, model_id: &str) -> Result<Self> {
        let model = StaticModel::from_pretrained(model_path, None, None, None)?;

        Ok(Self {
            model,
            model_id: model_id.to_string(),
        })
    }
}

impl EmbeddingCapability for Model2VecEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Initialize the process-wide embedding capability from config.
///
/// Availability is decided here, once per process: a missing or
/// unloadable model logs a warning and the process runs with keyword
/// matching only.
pub fn init_capability(config: &Config) -> Option<Arc<dyn EmbeddingCapability>> {
    let model_path = config.embedding_model_path();

    if !model_path.exists() {
        warn!(
            "No embedding model at {}; using keyword matching only",
            model_path.display()
        );
        return None;
    }

    match Model2VecEmbedder::load(&model_path, &config.models.embedding_model) {
        Ok(embedder) => {
            info!(
                "Semantic matching enabled with model {}",
                config.models.embedding_model
            );
            Some(Arc::new(embedder))
        }
        Err(e) => {
            warn!(
                "Could not load embedding model from {}: {}; using keyword matching only",
                model_path.display(),
                e
            );
            None
        }
    }
}

//! Embedding capability interface

use crate::error::{MatcherError, Result};

/// A process-wide semantic embedding provider.
///
/// The handle is initialized once at startup and shared read-only
/// behind an `Arc`; implementations must be safe to call from
/// concurrent match requests.
pub trait EmbeddingCapability: Send + Sync {
    /// Encode one text block into an embedding vector.
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the underlying model, for reporting.
    fn model_id(&self) -> &str;
}

/// Cosine similarity between two embedding vectors, in [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.is_empty() || a.len() != b.len() {
        return Err(MatcherError::Embedding(format!(
            "Embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

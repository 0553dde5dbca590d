use async_trait::async_trait;

use crate::types::error::{RagError, Result};

/// Embedding generation collaborator. Implementations must be
/// order-preserving: one vector per input text, and must fail atomically on
/// request error (no partial vector lists).
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Embedding("embedder returned no vector".to_string()))
    }
}

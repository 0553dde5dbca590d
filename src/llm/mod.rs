use async_trait::async_trait;

use crate::types::error::Result;

/// Language-model completion collaborator. Used for open information
/// extraction, fact reranking (best-effort there) and answer generation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

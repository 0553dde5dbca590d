use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::types::error::{RagError, Result};

use super::client::Embedder;
use super::hasher::content_id;

/// Vector similarity store collaborator. The engine keeps three independent
/// instances (chunks, entities, facts) behind this contract so backends are
/// swappable.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed and store texts. Content-addressed and idempotent: inserting
    /// identical text twice returns the same id without re-embedding.
    async fn insert(&self, texts: &[String]) -> Result<Vec<String>>;

    /// Cosine-similarity search, ids and scores sorted descending by score.
    async fn search(&self, query: &[f32], top_k: usize) -> Result<(Vec<String>, Vec<f32>)>;

    /// Stored vector by id.
    async fn get(&self, id: &str) -> Result<Vec<f32>>;

    /// Original text by id.
    async fn get_content(&self, id: &str) -> Result<String>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    embeddings: HashMap<String, Vec<f32>>,
    contents: HashMap<String, String>,
}

/// Exact-search in-memory VectorStore backed by any Embedder.
pub struct MemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    data: RwLock<StoreData>,
}

impl MemoryVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            data: RwLock::new(StoreData::default()),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.embeddings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Persist contents and vectors as JSON.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = {
            let data = self.data.read().await;
            serde_json::to_vec_pretty(&*data)?
        };
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Replace the store's contents from a JSON snapshot written by `save`.
    pub async fn load(&self, path: &Path) -> Result<()> {
        let json = tokio::fs::read(path).await?;
        let loaded: StoreData = serde_json::from_slice(&json)?;
        *self.data.write().await = loaded;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert(&self, texts: &[String]) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = texts.iter().map(|t| content_id(t)).collect();

        // Embed only texts this store has not seen, one id per distinct text.
        let new_texts: Vec<String> = {
            let data = self.data.read().await;
            let mut seen = std::collections::HashSet::new();
            texts
                .iter()
                .zip(&ids)
                .filter(|(_, id)| !data.embeddings.contains_key(*id) && seen.insert((*id).clone()))
                .map(|(text, _)| text.clone())
                .collect()
        };

        if !new_texts.is_empty() {
            let vectors = self.embedder.embed(&new_texts).await?;
            if vectors.len() != new_texts.len() {
                return Err(RagError::Embedding(format!(
                    "expected {} vectors, got {}",
                    new_texts.len(),
                    vectors.len()
                )));
            }

            let mut data = self.data.write().await;
            for (text, vector) in new_texts.iter().zip(vectors) {
                let id = content_id(text);
                data.embeddings.insert(id.clone(), vector);
                data.contents.insert(id, text.clone());
            }
        }

        Ok(ids)
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<(Vec<String>, Vec<f32>)> {
        let data = self.data.read().await;
        if data.embeddings.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut results: Vec<(&String, f32)> = data
            .embeddings
            .iter()
            .map(|(id, vector)| (id, cosine_similarity(query, vector)))
            .collect();

        // Descending by score, id as a deterministic tie-break.
        results.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        results.truncate(top_k);

        let ids = results.iter().map(|(id, _)| (*id).clone()).collect();
        let scores = results.iter().map(|(_, score)| *score).collect();
        Ok((ids, scores))
    }

    async fn get(&self, id: &str) -> Result<Vec<f32>> {
        self.data
            .read()
            .await
            .embeddings
            .get(id)
            .cloned()
            .ok_or_else(|| RagError::NotFound(format!("embedding {id}")))
    }

    async fn get_content(&self, id: &str) -> Result<String> {
        self.data
            .read()
            .await
            .contents
            .get(id)
            .cloned()
            .ok_or_else(|| RagError::NotFound(format!("content {id}")))
    }
}

/// Cosine similarity in [-1, 1]; zero for mismatched or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockEmbedder;

    fn store() -> MemoryVectorStore {
        MemoryVectorStore::new(Arc::new(MockEmbedder::default()))
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let store = store();
        let first = store.insert(&["paris".to_string()]).await.unwrap();
        let second = store.insert(&["paris".to_string()]).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len().await, 1);
        assert_eq!(first[0], content_id("paris"));
    }

    #[tokio::test]
    async fn test_insert_duplicate_texts_in_one_batch() {
        let store = store();
        let ids = store
            .insert(&["a".to_string(), "b".to_string(), "a".to_string()])
            .await
            .unwrap();

        assert_eq!(ids[0], ids[2]);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_search_returns_most_similar_first() {
        let store = store();
        store
            .insert(&[
                "the capital of france".to_string(),
                "rust borrow checker".to_string(),
            ])
            .await
            .unwrap();

        let query = MockEmbedder::default()
            .embed(&["capital france".to_string()])
            .await
            .unwrap()
            .remove(0);
        let (ids, scores) = store.search(&query, 2).await.unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], content_id("the capital of france"));
        assert!(scores[0] >= scores[1]);

        let content = store.get_content(&ids[0]).await.unwrap();
        assert_eq!(content, "the capital of france");
    }

    #[tokio::test]
    async fn test_get_missing_id_errors() {
        let store = store();
        assert!(matches!(
            store.get("nope").await,
            Err(RagError::NotFound(_))
        ));
        assert!(matches!(
            store.get_content("nope").await,
            Err(RagError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = store();
        let ids = store.insert(&["persisted text".to_string()]).await.unwrap();
        store.save(&path).await.unwrap();

        let restored = MemoryVectorStore::new(Arc::new(MockEmbedder::default()));
        restored.load(&path).await.unwrap();

        assert_eq!(restored.len().await, 1);
        assert_eq!(
            restored.get_content(&ids[0]).await.unwrap(),
            "persisted text"
        );
        assert_eq!(
            restored.get(&ids[0]).await.unwrap(),
            store.get(&ids[0]).await.unwrap()
        );
    }
}

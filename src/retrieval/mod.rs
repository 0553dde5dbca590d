//! Retrieval orchestrator: indexing, entity-seeded retrieval, fused
//! retrieval and answer generation over the knowledge graph.

pub mod index;
pub mod qa;
pub mod rerank;
pub mod retrieve;
pub mod retrieve_full;

pub use index::IndexStats;
pub use rerank::RerankOutcome;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::RagConfig;
use crate::embedding::{Embedder, MemoryVectorStore, VectorStore};
use crate::graph::{IndexedGraph, KnowledgeGraph, NodeKind};
use crate::llm::CompletionClient;
use crate::openie::Extractor;
use crate::types::error::{RagError, Result};
use crate::types::solution::QuerySolution;

/// Knowledge-graph retrieval engine.
///
/// Collaborators (embedding, vector stores, extraction, completion) are
/// trait objects so backends are swappable. The indexed graph is built once
/// per `index` call and shared read-only with concurrent queries; the lock
/// below only guards the ready/not-ready swap, never per-node access.
pub struct HippoRag {
    config: RagConfig,
    embedder: Arc<dyn Embedder>,
    completion: Arc<dyn CompletionClient>,
    extractor: Arc<dyn Extractor>,
    chunk_store: Arc<dyn VectorStore>,
    entity_store: Arc<dyn VectorStore>,
    fact_store: Arc<dyn VectorStore>,
    index: RwLock<Option<Arc<IndexedGraph>>>,
}

impl HippoRag {
    /// Engine backed by in-memory vector stores.
    pub fn new(
        config: RagConfig,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionClient>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self::with_stores(
            config,
            embedder.clone(),
            completion,
            extractor,
            Arc::new(MemoryVectorStore::new(embedder.clone())),
            Arc::new(MemoryVectorStore::new(embedder.clone())),
            Arc::new(MemoryVectorStore::new(embedder)),
        )
    }

    /// Engine with caller-supplied store backends (chunks, entities, facts).
    #[allow(clippy::too_many_arguments)]
    pub fn with_stores(
        config: RagConfig,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionClient>,
        extractor: Arc<dyn Extractor>,
        chunk_store: Arc<dyn VectorStore>,
        entity_store: Arc<dyn VectorStore>,
        fact_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            config,
            embedder,
            completion,
            extractor,
            chunk_store,
            entity_store,
            fact_store,
            index: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub async fn is_ready(&self) -> bool {
        self.index.read().await.is_some()
    }

    /// The current indexed graph, or `NotReady` before the first successful
    /// indexing pass.
    pub(crate) async fn indexed(&self) -> Result<Arc<IndexedGraph>> {
        self.index
            .read()
            .await
            .clone()
            .ok_or(RagError::NotReady)
    }

    pub(crate) async fn install_index(&self, indexed: IndexedGraph) {
        *self.index.write().await = Some(Arc::new(indexed));
    }
}

/// Guard against normalizing a degenerate seed distribution: PPR divides by
/// the total weight, so it must be strictly positive.
pub(crate) fn ensure_positive_seeds(seeds: &HashMap<String, f32>, source: &str) -> Result<()> {
    if seeds.is_empty() {
        return Err(RagError::EmptySeedSet(format!(
            "{source} produced no seed nodes"
        )));
    }
    let total: f32 = seeds.values().sum();
    if total <= 0.0 {
        return Err(RagError::EmptySeedSet(format!(
            "{source} produced seed weights with non-positive total {total}"
        )));
    }
    Ok(())
}

/// Filter PPR output to chunk nodes, order by descending score (id as the
/// deterministic tie-break) and truncate to `top_k`.
pub(crate) fn rank_chunks(
    query: &str,
    graph: &KnowledgeGraph,
    ppr_scores: &HashMap<String, f32>,
    top_k: usize,
) -> QuerySolution {
    let mut chunks: Vec<(&String, f32, &str)> = ppr_scores
        .iter()
        .filter_map(|(id, score)| {
            graph
                .node(id)
                .filter(|node| node.kind == NodeKind::Chunk)
                .map(|node| (id, *score, node.content.as_str()))
        })
        .collect();

    chunks.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    chunks.truncate(top_k);

    QuerySolution {
        query: query.to_string(),
        chunk_ids: chunks.iter().map(|(id, _, _)| (*id).clone()).collect(),
        chunk_texts: chunks.iter().map(|(_, _, text)| text.to_string()).collect(),
        scores: chunks.iter().map(|(_, score, _)| *score).collect(),
    }
}

use serde::{Deserialize, Serialize};

use crate::graph::builder::{collect_entities, fact_text, GraphBuilder};
use crate::text::chunk_text;
use crate::types::error::{RagError, Result};

use super::HippoRag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub nodes: usize,
    pub edges: usize,
    pub facts: usize,
}

impl HippoRag {
    /// Index a document set: chunk, embed, extract entities and triples,
    /// build the knowledge graph, and mark the engine ready.
    ///
    /// All-or-nothing: any collaborator failure aborts the pass and leaves
    /// the previously installed index (if any) undisturbed. There is no
    /// incremental indexing; re-run on failure.
    pub async fn index(&self, docs: &[String]) -> Result<()> {
        if docs.is_empty() {
            return Err(RagError::Indexing("no documents to index".to_string()));
        }

        let mut chunks = Vec::new();
        for doc in docs {
            chunks.extend(chunk_text(
                doc,
                self.config.chunk_size,
                self.config.chunk_overlap,
            ));
        }
        tracing::info!(docs = docs.len(), chunks = chunks.len(), "chunked documents");

        let chunk_ids = self.chunk_store.insert(&chunks).await?;

        let extractions = self.extractor.extract_batch(&chunks).await?;

        let entities = collect_entities(&extractions);
        let entity_ids = self.entity_store.insert(&entities).await?;

        let fact_texts: Vec<String> = extractions
            .iter()
            .flat_map(|e| e.triples.iter().map(fact_text))
            .collect();
        let fact_ids = self.fact_store.insert(&fact_texts).await?;
        tracing::info!(
            entities = entities.len(),
            facts = fact_texts.len(),
            "extracted entities and facts"
        );

        let mut builder = GraphBuilder::new();
        for (chunk_id, chunk) in chunk_ids.iter().zip(&chunks) {
            builder.add_chunk(chunk_id, chunk);
        }
        for (entity, entity_id) in entities.iter().zip(&entity_ids) {
            builder.add_entity(entity, entity_id);
        }

        let mut fact_offset = 0;
        for (chunk_id, extraction) in chunk_ids.iter().zip(&extractions) {
            let fact_slice = &fact_ids[fact_offset..fact_offset + extraction.triples.len()];
            builder.link_chunk(chunk_id, extraction, fact_slice);
            fact_offset += extraction.triples.len();
        }

        let indexed = builder.finish();
        tracing::info!(
            nodes = indexed.graph.node_count(),
            edges = indexed.graph.edge_count(),
            "knowledge graph built"
        );

        self.install_index(indexed).await;
        Ok(())
    }

    pub async fn stats(&self) -> Result<IndexStats> {
        let indexed = self.indexed().await?;
        Ok(IndexStats {
            nodes: indexed.graph.node_count(),
            edges: indexed.graph.edge_count(),
            facts: indexed.fact_entities.len(),
        })
    }
}

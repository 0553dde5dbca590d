use std::collections::HashMap;

use crate::types::error::Result;
use crate::types::solution::QuerySolution;

use super::{ensure_positive_seeds, rank_chunks, HippoRag};

impl HippoRag {
    /// Entity-seeded retrieval: seed PPR directly from the entities most
    /// similar to each query and return the `top_k` best-connected chunks.
    ///
    /// Batch failure policy: the first failing query aborts the whole batch.
    pub async fn retrieve(&self, queries: &[String], top_k: usize) -> Result<Vec<QuerySolution>> {
        let indexed = self.indexed().await?;
        let mut solutions = Vec::with_capacity(queries.len());

        for query in queries {
            let query_vec = self.embedder.embed_single(query).await?;

            let (entity_ids, entity_scores) = self
                .entity_store
                .search(&query_vec, self.config.top_k_entities)
                .await?;
            tracing::debug!(%query, entities = entity_ids.len(), "entity search done");

            let seeds: HashMap<String, f32> =
                entity_ids.into_iter().zip(entity_scores).collect();
            ensure_positive_seeds(&seeds, "entity similarity search")?;

            let ppr_scores = indexed.graph.personalized_page_rank(
                &seeds,
                self.config.ppr_damping,
                self.config.ppr_max_iter,
                self.config.ppr_tolerance,
            );
            tracing::debug!(%query, scored = ppr_scores.len(), "ppr done");

            solutions.push(rank_chunks(query, &indexed.graph, &ppr_scores, top_k));
        }

        Ok(solutions)
    }
}

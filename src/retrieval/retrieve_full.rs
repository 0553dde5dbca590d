use std::collections::HashMap;

use crate::types::error::Result;
use crate::types::solution::QuerySolution;

use super::rerank::{rerank_facts, RerankOutcome};
use super::{ensure_positive_seeds, rank_chunks, HippoRag};

impl HippoRag {
    /// Fused retrieval: seed PPR from fact similarity (optionally reranked
    /// by the completion model), the entities behind the top facts, and
    /// dense passage similarity, then return the `top_k` best-connected
    /// chunks.
    ///
    /// Embedding and similarity-search failures abort the batch; rerank
    /// failures fall back to similarity order and never abort.
    pub async fn retrieve_full(
        &self,
        queries: &[String],
        top_k: usize,
    ) -> Result<Vec<QuerySolution>> {
        let indexed = self.indexed().await?;
        let mut solutions = Vec::with_capacity(queries.len());

        for query in queries {
            // One embedding, reused for fact and passage search.
            let query_vec = self.embedder.embed_single(query).await?;

            let (fact_ids, fact_scores) = self
                .fact_store
                .search(&query_vec, self.config.top_k_entities)
                .await?;

            let mut fact_texts = Vec::with_capacity(fact_ids.len());
            for id in &fact_ids {
                fact_texts.push(self.fact_store.get_content(id).await?);
            }

            let order = match rerank_facts(self.completion.as_ref(), query, &fact_texts).await {
                RerankOutcome::Reordered(indices) => indices,
                RerankOutcome::Fallback => (0..fact_ids.len()).collect(),
            };

            // Seed the entities behind each fact, through the side table
            // built at indexing time. The weight paired with reranked
            // position `rank` is the rank-th similarity score: reranking
            // permutes the facts under a fixed descending weight profile.
            let mut seeds: HashMap<String, f32> = HashMap::new();
            for (rank, &fact_idx) in order.iter().enumerate() {
                if rank >= fact_scores.len() {
                    break;
                }
                let Some((subject_id, object_id)) = indexed.fact_entities.get(&fact_ids[fact_idx])
                else {
                    continue;
                };

                let endpoints = if subject_id == object_id {
                    vec![subject_id]
                } else {
                    vec![subject_id, object_id]
                };
                let share = fact_scores[rank] / endpoints.len() as f32;
                for entity_id in endpoints {
                    if indexed.graph.node(entity_id).is_some() {
                        *seeds.entry(entity_id.clone()).or_insert(0.0) += share;
                    }
                }
            }
            tracing::debug!(%query, entity_seeds = seeds.len(), "fact seeding done");

            // Dense passage seeds: min-max normalized, scaled by the passage
            // coefficient, overwriting any prior seed entry for the id.
            let (chunk_ids, chunk_scores) = self.chunk_store.search(&query_vec, top_k).await?;
            let normalized = min_max_normalize(&chunk_scores);
            for (chunk_id, score) in chunk_ids.iter().zip(normalized) {
                if indexed.graph.node(chunk_id).is_some() {
                    seeds.insert(chunk_id.clone(), score * self.config.passage_node_weight);
                }
            }

            ensure_positive_seeds(&seeds, "fused seeding")?;

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

/// Min-max normalize into [0, 1]. A uniform list maps to all 1.0 so equal
/// evidence is not zeroed out.
pub(crate) fn min_max_normalize(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max - min <= f32::EPSILON {
        return vec![1.0; scores.len()];
    }

    scores.iter().map(|s| (s - min) / (max - min)).collect()
}

use crate::graph::{PPR_DAMPING, PPR_MAX_ITER, PPR_TOLERANCE};

/// Tuning knobs for indexing and retrieval.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Characters per chunk when splitting documents.
    pub chunk_size: usize,
    /// Overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,

    /// PPR damping factor. Higher values let mass travel further from the seeds.
    pub ppr_damping: f32,
    /// Maximum PPR iterations before giving up on convergence.
    pub ppr_max_iter: usize,
    /// Convergence threshold on the max per-node score delta.
    pub ppr_tolerance: f32,

    /// Entities (and facts, in fused retrieval) fetched per similarity search.
    pub top_k_entities: usize,
    /// Chunks returned per query.
    pub top_k_chunks: usize,
    /// Coefficient applied to normalized dense-passage scores when they are
    /// injected as PPR seeds in fused retrieval.
    pub passage_node_weight: f32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            chunk_overlap: 50,
            ppr_damping: PPR_DAMPING,
            ppr_max_iter: PPR_MAX_ITER,
            ppr_tolerance: PPR_TOLERANCE,
            top_k_entities: 10,
            top_k_chunks: 5,
            passage_node_weight: 0.05,
        }
    }
}

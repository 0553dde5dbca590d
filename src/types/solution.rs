use serde::{Deserialize, Serialize};

/// Result of one retrieved query. `chunk_ids`, `chunk_texts` and `scores`
/// are aligned by index and sorted by descending PPR score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySolution {
    pub query: String,
    pub chunk_ids: Vec<String>,
    pub chunk_texts: Vec<String>,
    pub scores: Vec<f32>,
}

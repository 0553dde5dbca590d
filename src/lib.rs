pub mod config;
pub mod embedding;
pub mod graph;
pub mod llm;
pub mod openie;
pub mod retrieval;
pub mod text;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::RagConfig;
pub use retrieval::HippoRag;
pub use types::error::{RagError, Result};
pub use types::solution::QuerySolution;

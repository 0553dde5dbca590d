pub mod client;
pub mod hasher;
pub mod store;

pub use client::Embedder;
pub use hasher::content_id;
pub use store::{MemoryVectorStore, VectorStore};

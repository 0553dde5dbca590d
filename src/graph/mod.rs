pub mod builder;
pub mod ppr;
pub mod store;

pub use builder::{GraphBuilder, IndexedGraph};
pub use ppr::{PPR_DAMPING, PPR_MAX_ITER, PPR_TOLERANCE};
pub use store::{Edge, EdgeKind, KnowledgeGraph, Node, NodeKind};

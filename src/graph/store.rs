use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Entity,
    Chunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// subject -> object relation extracted from a triple.
    Fact,
    /// object -> subject reverse of a fact, weighted lower.
    FactBack,
    /// chunk -> entity membership.
    Passage,
    /// entity -> chunk, lets PPR mass flow back into source passages.
    PassageBack,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub content: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f32,
    pub kind: EdgeKind,
}

/// Directed multigraph over content-addressed node ids.
///
/// The graph is mutated only while an index is being built; once built it is
/// frozen behind an `Arc` and shared read-only across concurrent queries, so
/// no interior locking is needed.
///
/// Invariant: the weighted edge table keeps at most one entry per (from, to)
/// pair (later insertions overwrite it), but the adjacency list appends one
/// entry per successful `add_edge` call. Re-inserting the same pair therefore
/// multiplies that neighbor's share of propagated mass during PPR. This
/// insertion-counted multiplicity is intentional.
#[derive(Debug, Default)]
pub struct KnowledgeGraph {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, HashMap<String, Edge>>,
    adjacency: HashMap<String, Vec<String>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a node. Re-adding an existing id overwrites its content and
    /// kind; the adjacency entry (and any recorded neighbors) is kept.
    pub fn add_node(&mut self, id: impl Into<String>, content: impl Into<String>, kind: NodeKind) {
        let id = id.into();
        self.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                content: content.into(),
                kind,
            },
        );
        self.adjacency.entry(id).or_default();
    }

    /// Store a directed edge. A no-op if either endpoint is missing.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f32, kind: EdgeKind) {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return;
        }

        self.edges.entry(from.to_string()).or_default().insert(
            to.to_string(),
            Edge {
                from: from.to_string(),
                to: to.to_string(),
                weight,
                kind,
            },
        );

        // Append-only: one entry per call, duplicates permitted.
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Outgoing neighbor ids, possibly empty, possibly repeating an id once
    /// per insertion of the corresponding edge.
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.get(from).and_then(|m| m.get(to))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (from, to) weighted entries, independent of
    /// adjacency-list duplication.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }
}

use std::collections::{HashMap, HashSet};

use crate::openie::{Extraction, Triple};

use super::store::{EdgeKind, KnowledgeGraph, NodeKind};

/// A fully built index: the graph plus the side table mapping each fact's
/// store id to its subject/object entity node ids. The side table is what
/// fused retrieval uses to turn reranked facts back into seed entities, so
/// fact text is never re-parsed.
#[derive(Debug)]
pub struct IndexedGraph {
    pub graph: KnowledgeGraph,
    pub fact_entities: HashMap<String, (String, String)>,
}

/// Assembles the knowledge graph for one indexing pass.
///
/// Usage order matters for id consistency: all chunks and entities first,
/// then one `link_chunk` call per chunk with that chunk's extraction and the
/// store ids of its facts.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: KnowledgeGraph,
    entity_ids: HashMap<String, String>,
    fact_entities: HashMap<String, (String, String)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chunk(&mut self, id: &str, text: &str) {
        self.graph.add_node(id, text, NodeKind::Chunk);
    }

    pub fn add_entity(&mut self, text: &str, id: &str) {
        self.graph.add_node(id, text, NodeKind::Entity);
        self.entity_ids.insert(text.to_string(), id.to_string());
    }

    /// Wire one chunk's extraction into the graph.
    ///
    /// Every entity mentioned in the chunk gets a bidirectional passage link
    /// (both directions weight 1.0) so PPR mass can flow from a matched
    /// entity back into its source passage. Every triple gets a forward fact
    /// edge (1.0) and a weaker backward edge (0.5), deliberately asymmetric
    /// so forward reasoning is favored. `fact_ids` must align with
    /// `extraction.triples`.
    pub fn link_chunk(&mut self, chunk_id: &str, extraction: &Extraction, fact_ids: &[String]) {
        for entity in &extraction.entities {
            if let Some(entity_id) = self.entity_ids.get(entity) {
                let entity_id = entity_id.clone();
                self.graph
                    .add_edge(chunk_id, &entity_id, 1.0, EdgeKind::Passage);
                self.graph
                    .add_edge(&entity_id, chunk_id, 1.0, EdgeKind::PassageBack);
            }
        }

        for (triple, fact_id) in extraction.triples.iter().zip(fact_ids) {
            let (Some(subject_id), Some(object_id)) = (
                self.entity_ids.get(&triple.subject).cloned(),
                self.entity_ids.get(&triple.object).cloned(),
            ) else {
                continue;
            };

            self.graph
                .add_edge(&subject_id, &object_id, 1.0, EdgeKind::Fact);
            self.graph
                .add_edge(&object_id, &subject_id, 0.5, EdgeKind::FactBack);
            self.fact_entities
                .insert(fact_id.clone(), (subject_id, object_id));
        }
    }

    pub fn finish(self) -> IndexedGraph {
        IndexedGraph {
            graph: self.graph,
            fact_entities: self.fact_entities,
        }
    }
}

/// Union of all entity mentions: the flat entity lists plus every triple's
/// subject and object, deduplicated by literal string, first-seen order.
pub fn collect_entities(extractions: &[Extraction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut entities = Vec::new();

    let mut push = |entity: &str| {
        if seen.insert(entity.to_string()) {
            entities.push(entity.to_string());
        }
    };

    for extraction in extractions {
        for entity in &extraction.entities {
            push(entity);
        }
        for triple in &extraction.triples {
            push(&triple.subject);
            push(&triple.object);
        }
    }

    entities
}

/// Canonical fact serialization used as the fact store's embedding content.
pub fn fact_text(triple: &Triple) -> String {
    format!("{} {} {}", triple.subject, triple.predicate, triple.object)
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RagConfig;
use crate::embedding::Embedder;
use crate::llm::CompletionClient;
use crate::openie::{Extraction, Extractor, Triple};
use crate::retrieval::HippoRag;
use crate::types::error::{RagError, Result};

const MOCK_DIM: usize = 64;

/// Deterministic embedder: each token is hashed into one of `MOCK_DIM`
/// buckets, so texts sharing tokens have higher cosine similarity and
/// unrelated texts score near zero.
#[derive(Debug, Default, Clone)]
pub struct MockEmbedder {
    /// When set, any batch containing this exact text fails.
    pub fail_on: Option<String>,
}

impl MockEmbedder {
    fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; MOCK_DIM];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = blake3::hash(token.as_bytes());
            let bucket = u16::from_le_bytes([hash.as_bytes()[0], hash.as_bytes()[1]]) as usize;
            v[bucket % MOCK_DIM] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if let Some(poison) = &self.fail_on {
            if texts.iter().any(|t| t == poison) {
                return Err(RagError::Embedding("mock embedder failure".to_string()));
            }
        }
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Extractor that replays a fixed extraction per known chunk text. Unknown
/// text yields an empty extraction, or an error when `strict` is set.
#[derive(Debug, Default)]
pub struct ScriptedExtractor {
    extractions: HashMap<String, Extraction>,
    pub strict: bool,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, entities: &[&str], triples: &[(&str, &str, &str)]) -> Self {
        self.extractions.insert(
            text.to_string(),
            Extraction {
                entities: entities.iter().map(|e| e.to_string()).collect(),
                triples: triples
                    .iter()
                    .map(|(s, p, o)| Triple {
                        subject: s.to_string(),
                        predicate: p.to_string(),
                        object: o.to_string(),
                    })
                    .collect(),
            },
        );
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract(&self, text: &str) -> Result<Extraction> {
        match self.extractions.get(text) {
            Some(extraction) => Ok(extraction.clone()),
            None if self.strict => Err(RagError::Extraction(format!("unscripted text: {text}"))),
            None => Ok(Extraction::default()),
        }
    }
}

/// Completion client that always replies with the same text.
pub struct StaticCompletion {
    reply: String,
}

impl StaticCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for StaticCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}

/// Completion client that always fails.
pub struct FailingCompletion;

#[async_trait]
impl CompletionClient for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(RagError::Completion("mock completion failure".to_string()))
    }
}

/// A HippoRag wired with mock collaborators and in-memory stores.
pub fn test_rag(
    extractor: Arc<dyn Extractor>,
    completion: Arc<dyn CompletionClient>,
) -> HippoRag {
    HippoRag::new(
        RagConfig::default(),
        Arc::new(MockEmbedder::default()),
        completion,
        extractor,
    )
}

/// Two-document corpus used across retrieval tests: chunk A mentions Paris,
/// chunk B mentions France and carries the (Paris, capitalOf, France) fact.
pub fn paris_corpus() -> (Vec<String>, ScriptedExtractor) {
    let doc_a = "Paris has narrow streets and long evenings.";
    let doc_b = "France is a country and its capital is Paris.";
    let extractor = ScriptedExtractor::new()
        .with(doc_a, &["Paris"], &[])
        .with(doc_b, &["France"], &[("Paris", "capitalOf", "France")]);
    (vec![doc_a.to_string(), doc_b.to_string()], extractor)
}

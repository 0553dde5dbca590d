//! Open information extraction: entities and (subject, predicate, object)
//! triples pulled out of chunk text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm::CompletionClient;
use crate::types::error::{RagError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub triples: Vec<Triple>,
}

/// Entity/triple extraction collaborator.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Extraction>;

    /// Sequential and fail-fast: any failed chunk aborts the batch, which in
    /// turn aborts the whole indexing pass.
    async fn extract_batch(&self, texts: &[String]) -> Result<Vec<Extraction>> {
        let mut results = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let extraction = self
                .extract(text)
                .await
                .map_err(|e| RagError::Extraction(format!("chunk {i}: {e}")))?;
            results.push(extraction);
        }
        Ok(results)
    }
}

/// Extractor backed by a completion model prompted to emit JSON.
pub struct LlmExtractor {
    client: Arc<dyn CompletionClient>,
}

impl LlmExtractor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for LlmExtractor {
    async fn extract(&self, text: &str) -> Result<Extraction> {
        let prompt = extraction_prompt(text);
        let response = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| RagError::Extraction(e.to_string()))?;
        parse_extraction(&response)
    }
}

fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract entities and relationships from the following text.
Return the result in JSON format with two fields:
1. "entities": a list of all entities (nouns, proper nouns)
2. "triples": a list of relationship triples, each with "subject", "predicate", "object"

Text: {text}

Return only valid JSON, no additional text."#
    )
}

/// Models often wrap JSON in a markdown fence; strip it before parsing.
fn parse_extraction(response: &str) -> Result<Extraction> {
    let body = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(body)
        .map_err(|e| RagError::Extraction(format!("malformed extraction response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StaticCompletion;

    #[test]
    fn test_parse_extraction_plain_json() {
        let ext = parse_extraction(
            r#"{"entities": ["Paris"], "triples": [{"subject": "Paris", "predicate": "capitalOf", "object": "France"}]}"#,
        )
        .unwrap();
        assert_eq!(ext.entities, ["Paris"]);
        assert_eq!(ext.triples[0].predicate, "capitalOf");
    }

    #[test]
    fn test_parse_extraction_strips_markdown_fence() {
        let ext = parse_extraction("```json\n{\"entities\": [\"Paris\"], \"triples\": []}\n```").unwrap();
        assert_eq!(ext.entities, ["Paris"]);
        assert!(ext.triples.is_empty());
    }

    #[test]
    fn test_parse_extraction_missing_fields_default_empty() {
        let ext = parse_extraction("{}").unwrap();
        assert!(ext.entities.is_empty());
        assert!(ext.triples.is_empty());
    }

    #[test]
    fn test_parse_extraction_rejects_garbage() {
        assert!(matches!(
            parse_extraction("sorry, I cannot help with that"),
            Err(RagError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_llm_extractor_round_trip() {
        let client = Arc::new(StaticCompletion::new(
            r#"{"entities": ["Rust"], "triples": []}"#,
        ));
        let extractor = LlmExtractor::new(client);

        let ext = extractor.extract("Rust is a language.").await.unwrap();
        assert_eq!(ext.entities, ["Rust"]);
    }

    #[tokio::test]
    async fn test_extract_batch_is_fail_fast() {
        struct FlakyExtractor;

        #[async_trait]
        impl Extractor for FlakyExtractor {
            async fn extract(&self, text: &str) -> Result<Extraction> {
                if text == "bad" {
                    Err(RagError::Extraction("boom".to_string()))
                } else {
                    Ok(Extraction::default())
                }
            }
        }

        let err = FlakyExtractor
            .extract_batch(&["ok".to_string(), "bad".to_string(), "ok".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Extraction(_)));
    }
}

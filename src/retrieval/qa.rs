use crate::types::error::{RagError, Result};

use super::HippoRag;

impl HippoRag {
    /// Answer a question: retrieve the most relevant chunks, then let the
    /// completion model generate an answer grounded in them.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let solutions = self
            .retrieve(&[query.to_string()], self.config.top_k_chunks)
            .await?;
        let solution = solutions
            .into_iter()
            .next()
            .ok_or_else(|| RagError::NotFound("no solution for query".to_string()))?;

        let context = solution.chunk_texts.join("\n");
        let prompt = answer_prompt(&context, query);

        self.completion
            .complete(&prompt)
            .await
            .map_err(|e| RagError::Completion(e.to_string()))
    }
}

fn answer_prompt(context: &str, query: &str) -> String {
    format!(
        r#"Answer the question based on the documents below. If the documents
do not contain enough information, say so.

Documents:
{context}

Question: {query}

Answer:"#
    )
}

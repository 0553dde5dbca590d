use crate::llm::CompletionClient;

/// Outcome of the best-effort fact rerank. A failed completion call or an
/// unparsable reply is a `Fallback`, never an error: fused retrieval then
/// keeps the similarity order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RerankOutcome {
    /// Zero-based indices into the original fact list, most relevant first.
    Reordered(Vec<usize>),
    Fallback,
}

pub(crate) fn rerank_prompt(query: &str, facts: &[String]) -> String {
    let mut listing = String::new();
    for (i, fact) in facts.iter().enumerate() {
        listing.push_str(&format!("{}. {}\n", i + 1, fact));
    }

    format!(
        r#"Given the query: "{query}"

Rank the following facts by relevance to the query, most relevant first:
{listing}
Return only the ranked numbers, comma-separated. Example: 3,1,4,2,5

Ranking:"#
    )
}

/// Parse a comma-separated list of 1-based indices, permissively: malformed
/// or out-of-range tokens are skipped; nothing valid means fallback.
pub(crate) fn parse_rerank_response(response: &str, fact_count: usize) -> RerankOutcome {
    let indices: Vec<usize> = response
        .trim()
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|&i| i >= 1 && i <= fact_count)
        .map(|i| i - 1)
        .collect();

    if indices.is_empty() {
        RerankOutcome::Fallback
    } else {
        RerankOutcome::Reordered(indices)
    }
}

/// Ask the completion model to reorder `facts` by relevance to `query`.
pub(crate) async fn rerank_facts(
    client: &dyn CompletionClient,
    query: &str,
    facts: &[String],
) -> RerankOutcome {
    if facts.is_empty() {
        return RerankOutcome::Fallback;
    }

    match client.complete(&rerank_prompt(query, facts)).await {
        Ok(response) => parse_rerank_response(&response, facts.len()),
        Err(e) => {
            tracing::warn!(error = %e, "fact rerank failed, keeping similarity order");
            RerankOutcome::Fallback
        }
    }
}

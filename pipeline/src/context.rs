//! Grounding-context and prompt construction.

use newsrag_providers::ScoredPoint;

/// Extract the display text of a retrieved passage.
///
/// Payloads are opaque; by convention the article text lives under `text`
/// or `content`. Anything else is rendered as raw JSON so the passage is
/// never silently dropped.
pub(crate) fn passage_text(payload: &serde_json::Value) -> String {
    payload
        .get("text")
        .or_else(|| payload.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
        .unwrap_or_else(|| payload.to_string())
}

/// Concatenate passages into a numbered, score-annotated block.
///
/// Passages keep their retrieval rank order; no re-sorting happens here.
pub(crate) fn build_context(points: &[ScoredPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            format!(
                "--- passage {n} (score: {score}) ---\n{text}\n",
                n = i + 1,
                score = point.score,
                text = passage_text(&point.payload),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the generation prompt from the question and its context block.
pub(crate) fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are a friendly news assistant.\n\
         Read the following passages and answer the user in a natural, conversational tone.\n\
         Summarize in 2-3 sentences. If the question is not related to the passages or a news \
         topic, say that you are a news assistant and cannot answer it.\n\
         \n\
         User question:\n\
         {query}\n\
         \n\
         Context passages:\n\
         {context}\n\
         \n\
         Provide the final answer now:\n"
    )
}

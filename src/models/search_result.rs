// file: src/models/search_result.rs
// description: Search request and scored result models for hybrid retrieval
// reference: Used for hybrid BM25 + vector search results

use crate::models::Document;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Incoming hybrid search parameters.
///
/// A missing or non-string `query` is treated as the empty query rather than
/// rejected; `limit` and `use_compact_mode` must be well-typed when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query text
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,

    /// Maximum number of results to return (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Echo compact (256-dim) instead of full (1024-dim) embedding metadata (default: true)
    #[serde(default)]
    pub use_compact_mode: Option<bool>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_compact_mode(mut self, compact: bool) -> Self {
        self.use_compact_mode = Some(compact);
        self
    }
}

pub(crate) fn lenient_query<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string).unwrap_or_default())
}

/// Per-query scoring record for one corpus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document_id: String,
    pub lexical_score: f64,
    pub similarity_score: f64,
    pub fused_score: f64,
    /// 1-indexed position in the lexical ranking
    pub lexical_rank: usize,
    /// 1-indexed position in the similarity ranking
    pub similarity_rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub similarity: f64,
    pub fused: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankBreakdown {
    pub lexical: usize,
    pub similarity: usize,
}

/// A scored document joined back to its corpus record, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub content: String,
    pub metadata: BTreeMap<String, String>,
    pub scores: ScoreBreakdown,
    pub ranks: RankBreakdown,
}

impl SearchHit {
    pub fn from_scored(document: &Document, scored: &ScoredDocument) -> Self {
        Self {
            id: document.id.clone(),
            content: document.content.clone(),
            metadata: document.metadata.clone(),
            scores: ScoreBreakdown {
                lexical: scored.lexical_score,
                similarity: scored.similarity_score,
                fused: scored.fused_score,
            },
            ranks: RankBreakdown {
                lexical: scored.lexical_rank,
                similarity: scored.similarity_rank,
            },
        }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let content_preview = crate::utils::Validator::truncate_text(&self.content, max_content_len);

        format!(
            "Fused: {:.4} | {} (lexical #{} {:.3}, similarity #{} {:.3})\n{}\n",
            self.scores.fused,
            self.id,
            self.ranks.lexical,
            self.scores.lexical,
            self.ranks.similarity,
            self.scores.similarity,
            content_preview
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetadata {
    pub method: String,
    pub total_candidates: usize,
    pub fusion_k: usize,
    pub lexical_weight: f64,
    pub similarity_weight: f64,
    pub compact_mode: bool,
    pub embedding_dimensions: usize,
    pub execution_time_ms: f64,
}

/// Wire shape of a hybrid search reply, without the `ok` envelope flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub documents: Vec<SearchHit>,
    pub retrieval_metadata: RetrievalMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_becomes_empty() {
        let request: SearchRequest = serde_json::from_str(r#"{"limit": 3}"#).unwrap();
        assert_eq!(request.query, "");
        assert_eq!(request.limit, Some(3));
        assert_eq!(request.use_compact_mode, None);
    }

    #[test]
    fn test_non_string_query_becomes_empty() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": 42}"#).unwrap();
        assert_eq!(request.query, "");

        let request: SearchRequest = serde_json::from_str(r#"{"query": null}"#).unwrap();
        assert_eq!(request.query, "");
    }

    #[test]
    fn test_wrong_typed_limit_is_rejected() {
        let parsed = serde_json::from_str::<SearchRequest>(r#"{"query": "a", "limit": "ten"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_format_summary() {
        let doc = Document::new("doc_x", "This is a very long content that will be truncated");
        let scored = ScoredDocument {
            document_id: "doc_x".to_string(),
            lexical_score: 1.25,
            similarity_score: 0.1,
            fused_score: 0.0328,
            lexical_rank: 1,
            similarity_rank: 2,
        };

        let summary = SearchHit::from_scored(&doc, &scored).format_summary(20);
        assert!(summary.contains("0.0328"));
        assert!(summary.contains("doc_x"));
        assert!(summary.contains("..."));
    }
}

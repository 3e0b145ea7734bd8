// file: src/rerank/mod.rs
// description: second-stage reranking of retrieved passages
// reference: FlashRank and ms-marco cross-encoder reranking strategies

pub mod cross_encoder;
pub mod fast;

use crate::error::{AglaError, Result};
use crate::utils::OperationTimer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RerankMode {
    #[default]
    Fast,
    Complex,
}

impl RerankMode {
    pub fn model(self) -> &'static str {
        match self {
            RerankMode::Fast => "flashrank-heuristic",
            RerankMode::Complex => "cross-encoder-heuristic",
        }
    }

    pub fn confidence(self) -> &'static str {
        match self {
            RerankMode::Fast => "medium",
            RerankMode::Complex => "high",
        }
    }

    fn score(self, query: &str, document: &str) -> f64 {
        match self {
            RerankMode::Fast => fast::score(query, document),
            RerankMode::Complex => cross_encoder::score(query, document),
        }
    }
}

/// A passage to rerank: either bare text or an object with `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum RerankInput {
    Text(String),
    Passage { content: String },
}

impl RerankInput {
    pub fn content(&self) -> &str {
        match self {
            RerankInput::Text(text) => text,
            RerankInput::Passage { content } => content,
        }
    }
}

impl From<&str> for RerankInput {
    fn from(text: &str) -> Self {
        RerankInput::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankedPassage {
    pub content: String,
    pub relevance_score: f64,
    pub original_rank: usize,
    pub new_rank: usize,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankMetadata {
    pub mode: RerankMode,
    pub model: String,
    pub documents_processed: usize,
    pub execution_time_ms: f64,
    pub top_score: f64,
    pub score_stats: ScoreStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankOutcome {
    pub reranked: Vec<RerankedPassage>,
    pub rerank_metadata: RerankMetadata,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reranker;

impl Reranker {
    pub fn new() -> Self {
        Self
    }

    /// Score each passage against `query` and sort best first.
    ///
    /// Equal scores keep their input order.
    pub fn rerank(&self, query: &str, documents: &[RerankInput], mode: RerankMode) -> Result<RerankOutcome> {
        if documents.is_empty() {
            return Err(AglaError::InvalidRequest(
                "No documents provided for reranking.".to_string(),
            ));
        }

        let timer = OperationTimer::quiet("rerank");
        info!("Rerank [{:?}]: {:?} over {} documents", mode, query, documents.len());

        let mut reranked: Vec<RerankedPassage> = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| RerankedPassage {
                content: doc.content().to_string(),
                relevance_score: mode.score(query, doc.content()),
                original_rank: index + 1,
                new_rank: 0,
                confidence: mode.confidence().to_string(),
            })
            .collect();

        reranked.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });
        for (index, passage) in reranked.iter_mut().enumerate() {
            passage.new_rank = index + 1;
        }

        let scores: Vec<f64> = reranked.iter().map(|p| p.relevance_score).collect();
        let max = scores.first().copied().unwrap_or(0.0);
        let min = scores.last().copied().unwrap_or(0.0);
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;

        let elapsed = timer.finish_with_count(documents.len());

        Ok(RerankOutcome {
            reranked,
            rerank_metadata: RerankMetadata {
                mode,
                model: mode.model().to_string(),
                documents_processed: documents.len(),
                execution_time_ms: elapsed.as_secs_f64() * 1000.0,
                top_score: max,
                score_stats: ScoreStats { mean, max, min },
            },
        })
    }
}

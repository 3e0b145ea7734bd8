// file: src/grading/mod.rs
// description: Self-RAG / CRAG style graders for retrieval, grounding and answer quality
// reference: https://arxiv.org/abs/2310.11511, https://arxiv.org/abs/2401.15884

pub mod answer;
pub mod hallucination;
pub mod retrieval;

use crate::error::{AglaError, Result};
use crate::extractor::patterns::SENTENCE_BOUNDARY;
use crate::models::search_result::lenient_query;
use crate::retrieval::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GradeKind {
    Retrieval,
    Hallucination,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Pass,
    Warn,
    Ambiguous,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub grade: Grade,
    pub score: f64,
    pub feedback: String,
    pub details: serde_json::Value,
    pub retry_recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_strategy: Option<String>,
}

impl GradeResult {
    fn retry(mut self, strategy: &str) -> Self {
        self.retry_recommended = true;
        self.retry_strategy = Some(strategy.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GradeRequest {
    /// Which grader to run: retrieval, hallucination or answer
    #[serde(rename = "type")]
    pub kind: Option<GradeKind>,

    /// User query (retrieval and answer grading)
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,

    /// Retrieved context (retrieval and hallucination grading)
    #[serde(default)]
    pub context: Option<String>,

    /// Generated response (hallucination and answer grading)
    #[serde(default)]
    pub response: Option<String>,

    /// Retries already spent on this query (default: 0)
    #[serde(default)]
    pub retry_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryMetadata {
    pub current_retry: u32,
    pub max_retries: u32,
    pub should_retry: bool,
    pub retry_strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    #[serde(rename = "type")]
    pub kind: GradeKind,
    #[serde(flatten)]
    pub result: GradeResult,
    pub retry_metadata: RetryMetadata,
    pub timestamp: String,
}

pub struct Grader {
    max_retries: u32,
}

impl Grader {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub fn grade(&self, request: &GradeRequest) -> Result<GradeOutcome> {
        let kind = request.kind.ok_or_else(|| {
            AglaError::InvalidRequest(
                "Missing grading type. Use 'retrieval', 'hallucination', or 'answer'.".to_string(),
            )
        })?;
        info!("Grader [{:?}]: retry={}", kind, request.retry_count);

        let query = request.query.as_str();
        let context = request.context.as_deref().unwrap_or("");
        let response = request.response.as_deref().unwrap_or("");

        let result = match kind {
            GradeKind::Retrieval => retrieval::grade(query, context),
            GradeKind::Hallucination => hallucination::grade(response, context),
            GradeKind::Answer => answer::grade(response, query),
        };

        let should_retry = result.retry_recommended && request.retry_count < self.max_retries;

        Ok(GradeOutcome {
            kind,
            retry_metadata: RetryMetadata {
                current_retry: request.retry_count,
                max_retries: self.max_retries,
                should_retry,
                retry_strategy: if should_retry {
                    result.retry_strategy.clone()
                } else {
                    None
                },
            },
            result,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Distinct lower-cased tokens longer than `min_chars` characters.
fn significant_terms(text: &str, min_chars: usize) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > min_chars)
        .collect()
}

/// Sentence fragments, trimmed, longer than `min_chars` characters.
fn sentences(text: &str, min_chars: usize) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .collect()
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: GradeKind) -> GradeRequest {
        GradeRequest {
            kind: Some(kind),
            ..GradeRequest::default()
        }
    }

    #[test]
    fn test_retry_allowed_below_max() {
        let grader = Grader::new(2);
        let outcome = grader.grade(&request(GradeKind::Answer)).unwrap();

        assert_eq!(outcome.result.grade, Grade::Fail);
        assert!(outcome.retry_metadata.should_retry);
        assert_eq!(outcome.retry_metadata.retry_strategy.as_deref(), Some("regenerate"));
    }

    #[test]
    fn test_retry_exhausted() {
        let grader = Grader::new(2);
        let mut req = request(GradeKind::Answer);
        req.retry_count = 2;
        let outcome = grader.grade(&req).unwrap();

        assert!(outcome.result.retry_recommended);
        assert!(!outcome.retry_metadata.should_retry);
        assert_eq!(outcome.retry_metadata.retry_strategy, None);
    }

    #[test]
    fn test_outcome_flattens_result() {
        let outcome = Grader::new(2).grade(&request(GradeKind::Retrieval)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["type"], "retrieval");
        assert_eq!(json["grade"], "fail");
        assert!(json["retry_metadata"]["should_retry"].as_bool().unwrap());
    }

    #[test]
    fn test_missing_kind_is_client_error() {
        let err = Grader::new(2).grade(&GradeRequest::default()).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_non_string_query_reads_as_empty() {
        let parsed: GradeRequest = serde_json::from_str(r#"{"type": "answer", "query": 42}"#).unwrap();
        assert_eq!(parsed.query, "");
        assert!(Grader::new(2).grade(&parsed).is_ok());
    }

    #[test]
    fn test_unknown_kind_rejected_when_parsing() {
        let parsed = serde_json::from_str::<GradeRequest>(r#"{"type": "vibes"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(ratio(1, 0), 0.0);
        assert_eq!(round_to(0.12345, 2), 0.12);
        assert_eq!(sentences("Short. This one is long enough!", 10), vec!["This one is long enough"]);
        assert!(significant_terms("a an the cache", 2).contains("cache"));
        assert!(!significant_terms("a an the cache", 2).contains("an"));
    }
}

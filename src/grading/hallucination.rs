// file: src/grading/hallucination.rs
// description: Self-RAG-style grounding check of a response against its context
// reference: https://arxiv.org/abs/2310.11511

use super::{Grade, GradeResult, ratio, sentences};
use crate::retrieval::tokenize;
use serde::Serialize;
use serde_json::json;

const MIN_CLAIM_CHARS: usize = 10;
const MIN_TERM_CHARS: usize = 3;
const SUPPORT_THRESHOLD: f64 = 0.4;
const MAX_REPORTED_CLAIMS: usize = 5;

#[derive(Debug, Serialize)]
struct ClaimAnalysis<'a> {
    claim: &'a str,
    supported: bool,
}

/// A claim is supported when enough of its longer terms appear in the context.
fn is_supported(claim: &str, context_lower: &str) -> bool {
    let terms: Vec<String> = tokenize(claim)
        .into_iter()
        .filter(|t| t.chars().count() > MIN_TERM_CHARS)
        .collect();
    let matched = terms.iter().filter(|t| context_lower.contains(t.as_str())).count();
    !terms.is_empty() && ratio(matched, terms.len()) > SUPPORT_THRESHOLD
}

pub fn grade(response: &str, context: &str) -> GradeResult {
    if response.is_empty() {
        return GradeResult {
            grade: Grade::Fail,
            score: 0.0,
            feedback: "No response provided to check.".to_string(),
            details: json!({}),
            retry_recommended: false,
            retry_strategy: None,
        }
        .retry("regenerate");
    }

    let context_lower = context.to_lowercase();
    let analysis: Vec<ClaimAnalysis<'_>> = sentences(response, MIN_CLAIM_CHARS)
        .into_iter()
        .map(|claim| ClaimAnalysis {
            claim,
            supported: is_supported(claim, &context_lower),
        })
        .collect();

    let supported = analysis.iter().filter(|c| c.supported).count();
    let unsupported = analysis.len() - supported;
    let score = if analysis.is_empty() {
        0.5
    } else {
        ratio(supported, analysis.len())
    };

    let (grade, feedback) = if score >= 0.85 {
        (
            Grade::Pass,
            "Response is well-grounded in evidence. No hallucination detected.".to_string(),
        )
    } else if score >= 0.65 {
        (
            Grade::Warn,
            format!("{} claim(s) may not be fully supported. Review flagged sections.", unsupported),
        )
    } else {
        (
            Grade::Fail,
            "Significant hallucination risk detected. Response contains unsupported claims.".to_string(),
        )
    };

    let result = GradeResult {
        grade,
        score,
        feedback,
        details: json!({
            "total_claims": analysis.len(),
            "supported_claims": supported,
            "unsupported_claims": unsupported,
            "grounding_ratio_percent": (score * 100.0).round(),
            "claim_analysis": &analysis[..analysis.len().min(MAX_REPORTED_CLAIMS)],
        }),
        retry_recommended: false,
        retry_strategy: None,
    };

    if score < 0.65 {
        result.retry("regenerate_with_stricter_grounding")
    } else {
        result
    }
}

// file: src/grading/retrieval.rs
// description: CRAG-style relevance grading of retrieved context against a query
// reference: https://arxiv.org/abs/2401.15884

use super::{Grade, GradeResult, ratio, round_to, significant_terms};
use crate::extractor::extract_named_entities;
use crate::retrieval::token_set;
use serde_json::json;

const MIN_CONTEXT_CHARS: usize = 20;
const FULL_COVERAGE_CHARS: f64 = 500.0;

pub fn grade(query: &str, context: &str) -> GradeResult {
    let context_len = context.chars().count();
    if context_len < MIN_CONTEXT_CHARS {
        return GradeResult {
            grade: Grade::Fail,
            score: 0.1,
            feedback: "Insufficient context retrieved. Documents appear irrelevant or empty.".to_string(),
            details: json!({ "reason": "empty_context", "context_length": context_len }),
            retry_recommended: false,
            retry_strategy: None,
        }
        .retry("expand_query");
    }

    let query_terms = significant_terms(query, 2);
    let context_terms = token_set(context);
    let overlap = query_terms.iter().filter(|t| context_terms.contains(*t)).count();
    let term_overlap = ratio(overlap, query_terms.len());

    let context_coverage = (context_len as f64 / FULL_COVERAGE_CHARS).min(1.0);

    let query_entities = extract_named_entities(query);
    let context_entities = extract_named_entities(context);
    // scoring accepts containment either way; the reported list only
    // names entities found verbatim inside a context entity
    let overlapping = query_entities
        .iter()
        .filter(|entity| {
            context_entities
                .iter()
                .any(|found| found.contains(entity.as_str()) || entity.contains(found.as_str()))
        })
        .count();
    let matched_entities: Vec<&String> = query_entities
        .iter()
        .filter(|entity| context_entities.iter().any(|found| found.contains(entity.as_str())))
        .collect();
    let entity_score = if query_entities.is_empty() {
        0.5
    } else {
        ratio(overlapping, query_entities.len())
    };

    let score = term_overlap * 0.4 + context_coverage * 0.2 + entity_score * 0.4;

    let (grade, feedback, strategy) = if score >= 0.7 {
        (Grade::Pass, "Retrieved documents are highly relevant. Proceeding with generation.", None)
    } else if score >= 0.5 {
        (
            Grade::Warn,
            "Retrieved documents have moderate relevance. May need additional context.",
            Some("augment_search"),
        )
    } else if score >= 0.3 {
        (
            Grade::Ambiguous,
            "Retrieval quality is uncertain. Consider reformulating query.",
            Some("reformulate_query"),
        )
    } else {
        (
            Grade::Fail,
            "Retrieved documents are not relevant. Retry with different approach.",
            Some("web_fallback"),
        )
    };

    let result = GradeResult {
        grade,
        score,
        feedback: feedback.to_string(),
        details: json!({
            "term_overlap": round_to(term_overlap, 2),
            "context_coverage": round_to(context_coverage, 2),
            "entity_score": round_to(entity_score, 2),
            "query_entities": query_entities,
            "matched_entities": matched_entities,
        }),
        retry_recommended: false,
        retry_strategy: None,
    };

    match strategy {
        Some(strategy) => result.retry(strategy),
        None => result,
    }
}

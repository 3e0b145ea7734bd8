// file: src/grading/answer.rs
// description: answer quality grading: relevance, completeness and clarity

use super::{Grade, GradeResult, ratio, round_to, sentences, significant_terms};
use crate::retrieval::tokenize;
use serde_json::json;

const MIN_RESPONSE_CHARS: usize = 10;
const COMPLETE_RESPONSE_CHARS: f64 = 200.0;

pub fn grade(response: &str, query: &str) -> GradeResult {
    let response_len = response.chars().count();
    if response_len < MIN_RESPONSE_CHARS {
        return GradeResult {
            grade: Grade::Fail,
            score: 0.1,
            feedback: "Response is too short or empty.".to_string(),
            details: json!({ "reason": "insufficient_length" }),
            retry_recommended: false,
            retry_strategy: None,
        }
        .retry("regenerate");
    }

    let query_terms = significant_terms(query, 2);
    let response_terms = tokenize(response);
    let addressed = query_terms.iter().filter(|t| response_terms.contains(*t)).count();
    let relevance = ratio(addressed, query_terms.len());

    let completeness = (response_len as f64 / COMPLETE_RESPONSE_CHARS).min(1.0);

    let sentence_count = sentences(response, 0).len();
    let avg_sentence_len = response_len as f64 / sentence_count.max(1) as f64;
    let clarity = if avg_sentence_len > 20.0 && avg_sentence_len < 150.0 {
        0.9
    } else {
        0.6
    };

    let score = relevance * 0.4 + completeness * 0.35 + clarity * 0.25;

    let (grade, feedback) = if score >= 0.75 {
        (Grade::Pass, "Answer is complete, relevant, and well-structured.")
    } else if score >= 0.55 {
        (
            Grade::Warn,
            "Answer is acceptable but could be improved in clarity or completeness.",
        )
    } else {
        (
            Grade::Fail,
            "Answer quality is insufficient. Consider regeneration or clarification.",
        )
    };

    let result = GradeResult {
        grade,
        score,
        feedback: feedback.to_string(),
        details: json!({
            "relevance": round_to(relevance, 2),
            "completeness": round_to(completeness, 2),
            "clarity": clarity,
            "sentence_count": sentence_count,
            "response_length": response_len,
        }),
        retry_recommended: false,
        retry_strategy: None,
    };

    if score < 0.55 {
        result.retry("regenerate_with_specificity")
    } else {
        result
    }
}

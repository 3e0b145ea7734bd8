// file: src/rerank/fast.rs
// description: FlashRank-style lexical reranking score

use crate::retrieval::tokenize;
use std::collections::HashSet;

/// Exact-term coverage, query-bigram hits and a mild length prior.
///
/// ```text
/// score = min(1, 1.5 * (0.6 * exact + 0.3 * bigram + 0.1 * min(doc_terms / 100, 1)))
/// ```
pub fn score(query: &str, document: &str) -> f64 {
    let query_terms = tokenize(query);
    let doc_terms = tokenize(document);

    if query_terms.is_empty() {
        return 0.0;
    }

    let doc_term_set: HashSet<&str> = doc_terms.iter().map(String::as_str).collect();
    let exact_matches = query_terms
        .iter()
        .filter(|term| doc_term_set.contains(term.as_str()))
        .count();

    let query_bigrams: HashSet<(&str, &str)> = query_terms
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();
    let bigram_matches = doc_terms
        .windows(2)
        .filter(|pair| query_bigrams.contains(&(pair[0].as_str(), pair[1].as_str())))
        .count();

    let length_prior = (doc_terms.len() as f64 / 100.0).min(1.0);
    let exact_score = exact_matches as f64 / query_terms.len() as f64;
    let bigram_score = bigram_matches as f64 / query_bigrams.len().max(1) as f64;

    ((exact_score * 0.6 + bigram_score * 0.3 + length_prior * 0.1) * 1.5).min(1.0)
}

// file: src/rerank/cross_encoder.rs
// description: cross-encoder-style reranking score with synonym credit and position bonus

use crate::retrieval::{token_set, tokenize};

/// Query term → terms accepted in its place, for 0.7 credit.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("rag", &["retrieval", "search", "fetch"]),
    ("architecture", &["system", "design", "structure"]),
    ("search", &["query", "find", "lookup", "retrieval"]),
    ("cache", &["store", "memory", "buffer"]),
    ("graph", &["network", "relationships", "connections"]),
];

/// Only the first this-many document terms earn a position bonus.
const POSITION_WINDOW: usize = 50;

fn synonyms_of(term: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == term)
        .map(|(_, syns)| *syns)
        .unwrap_or(&[])
}

pub fn score(query: &str, document: &str) -> f64 {
    let query_terms = token_set(query);
    let doc_terms = tokenize(document);

    if query_terms.is_empty() {
        return 0.0;
    }

    let contains = |term: &str| doc_terms.iter().any(|t| t == term);

    let mut semantic = 0.0;
    let mut position_bonus = 0.0;

    for term in &query_terms {
        if contains(term) {
            semantic += 1.0;
        } else if synonyms_of(term).iter().any(|syn| contains(syn)) {
            semantic += 0.7;
        }

        if let Some(idx) = doc_terms
            .iter()
            .position(|t| t == term)
            .filter(|idx| *idx < POSITION_WINDOW)
        {
            position_bonus += (POSITION_WINDOW - idx) as f64 / POSITION_WINDOW as f64 * 0.1;
        }
    }

    ((semantic / query_terms.len() as f64 + position_bonus) * 1.2).min(1.0)
}

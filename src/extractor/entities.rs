// file: src/extractor/entities.rs
// description: lightweight entity extraction for routing and grading
// reference: regex-based named entity heuristics

use super::patterns::{ACRONYM, CAPITALIZED_PHRASE, DOMAIN_TERMS};
use std::collections::HashSet;

/// Domain vocabulary present in a query, lower-cased, first-seen order.
pub fn extract_domain_terms(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    DOMAIN_TERMS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .map(|m| m.as_str().to_lowercase())
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Capitalized phrases then acronyms, lower-cased and de-duplicated.
pub fn extract_named_entities(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    CAPITALIZED_PHRASE
        .find_iter(text)
        .chain(ACRONYM.find_iter(text))
        .map(|m| m.as_str().to_lowercase())
        .filter(|entity| seen.insert(entity.clone()))
        .collect()
}

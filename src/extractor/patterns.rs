// file: src/extractor/patterns.rs
// description: compiled regex patterns for entity extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Domain vocabulary recognized by the semantic router, in reporting order.
    /// Unanchored on purpose: "LightRAG" also yields "rag".
    pub static ref DOMAIN_TERMS: Vec<Regex> = [
        "agla", "rag", "gentel", "lightrag", "vector", "graph", "hybrid", "search",
        "retrieval", "routing", "cache", "rerank", "bm25", "embedding", "semantic",
    ]
    .iter()
    .map(|term| Regex::new(&format!("(?i){}", term)).expect("domain term regex is valid"))
    .collect();

    /// Runs of capitalized words, e.g. "Binary Quantization".
    pub static ref CAPITALIZED_PHRASE: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b"
    ).expect("CAPITALIZED_PHRASE regex is valid");

    pub static ref ACRONYM: Regex = Regex::new(
        r"\b[A-Z]{2,}\b"
    ).expect("ACRONYM regex is valid");

    pub static ref SENTENCE_BOUNDARY: Regex = Regex::new(
        r"[.!?]+"
    ).expect("SENTENCE_BOUNDARY regex is valid");

    /// Punctuation stripped before building a cache key.
    pub static ref CACHE_KEY_PUNCTUATION: Regex = Regex::new(
        r"[?!.,]"
    ).expect("CACHE_KEY_PUNCTUATION regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_terms_are_case_insensitive() {
        assert_eq!(DOMAIN_TERMS.len(), 15);
        assert!(DOMAIN_TERMS[0].is_match("How does AGLA work"));
        assert!(DOMAIN_TERMS[1].is_match("LightRAG"));
    }

    #[test]
    fn test_capitalized_phrase_pattern() {
        let found: Vec<&str> = CAPITALIZED_PHRASE
            .find_iter("uses Binary Quantization and Matryoshka")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["Binary Quantization", "Matryoshka"]);
    }

    #[test]
    fn test_acronym_pattern() {
        assert!(ACRONYM.is_match("the RRF step"));
        assert!(!ACRONYM.is_match("the Rrf step"));
    }

    #[test]
    fn test_sentence_boundary_split() {
        let parts: Vec<&str> = SENTENCE_BOUNDARY.split("One. Two!! Three?").collect();
        assert_eq!(parts, vec!["One", " Two", " Three", ""]);
    }
}

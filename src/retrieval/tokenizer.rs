// file: src/retrieval/tokenizer.rs
// description: lower-cased whitespace tokenization shared by all scorers

use std::collections::HashSet;

/// Lower-case and split on whitespace; never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_empty() {
        assert_eq!(tokenize("  Cache\tLRU \n"), vec!["cache", "lru"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_token_set_dedupes() {
        let set = token_set("RAG rag Rag graph");
        assert_eq!(set.len(), 2);
        assert!(set.contains("rag"));
    }
}

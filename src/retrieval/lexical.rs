// file: src/retrieval/lexical.rs
// description: BM25-style lexical scorer over document keywords
// reference: https://en.wikipedia.org/wiki/Okapi_BM25

use super::Scorer;
use super::tokenizer::tokenize;
use crate::config::RetrievalConfig;
use crate::models::Document;

/// BM25 over each document's keyword list.
///
/// A query token hits a keyword when either string contains the other, so
/// `"quant"` hits `"quantization"` and `"binary-quantization"` hits `"binary"`.
/// `tf` is the number of keywords hit by the token.
#[derive(Debug, Clone, PartialEq)]
pub struct Bm25Scorer {
    k1: f64,
    b: f64,
    avg_doc_len: f64,
    corpus_size: usize,
}

impl Bm25Scorer {
    pub fn new(k1: f64, b: f64, avg_doc_len: f64, corpus_size: usize) -> Self {
        Self {
            k1,
            b,
            avg_doc_len,
            corpus_size,
        }
    }

    pub fn from_config(config: &RetrievalConfig, corpus_size: usize) -> Self {
        Self::new(config.k1, config.b, config.avg_doc_len, corpus_size)
    }

    fn term_frequency(term: &str, document: &Document) -> usize {
        document
            .keywords
            .iter()
            .filter(|kw| {
                let kw = kw.to_lowercase();
                kw.contains(term) || term.contains(kw.as_str())
            })
            .count()
    }

    /// Clamped at zero: with more hits than documents the raw formula goes negative.
    fn idf(&self, tf: usize) -> f64 {
        let n = self.corpus_size as f64;
        let tf = tf as f64;
        (1.0 + (n - tf + 0.5) / (tf + 0.5)).ln().max(0.0)
    }
}

impl Scorer for Bm25Scorer {
    fn score(&self, query: &str, document: &Document) -> f64 {
        let dl = document.word_count() as f64;
        let length_norm = 1.0 - self.b + self.b * (dl / self.avg_doc_len);

        tokenize(query)
            .iter()
            .map(|term| {
                let tf = Self::term_frequency(term, document);
                if tf == 0 {
                    return 0.0;
                }
                let tf_f = tf as f64;
                self.idf(tf) * (tf_f * (self.k1 + 1.0)) / (tf_f + self.k1 * length_norm)
            })
            // an empty f64 sum is -0.0
            .fold(0.0, |acc, score| acc + score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(corpus_size: usize) -> Bm25Scorer {
        Bm25Scorer::new(1.2, 0.75, 100.0, corpus_size)
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let doc = Document::new("a", "some content").with_keywords(["cache"]);
        assert_eq!(scorer(3).score("", &doc), 0.0);
        assert_eq!(scorer(3).score("   ", &doc), 0.0);
        assert!(scorer(3).score("", &doc).is_sign_positive());
    }

    #[test]
    fn test_no_keyword_hit_scores_zero() {
        let doc = Document::new("a", "some content").with_keywords(["cache", "lru"]);
        assert_eq!(scorer(3).score("graph", &doc), 0.0);
    }

    #[test]
    fn test_single_hit_matches_formula() {
        // dl = 4, tf = 1, N = 3
        let doc = Document::new("a", "one two three four").with_keywords(["cache", "lru"]);
        let idf = (1.0_f64 + (3.0 - 1.0 + 0.5) / (1.0 + 0.5)).ln();
        let norm = 1.0 - 0.75 + 0.75 * (4.0 / 100.0);
        let expected = idf * (1.0 * 2.2) / (1.0 + 1.2 * norm);

        let score = scorer(3).score("cache", &doc);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bidirectional_substring_match() {
        let doc = Document::new("a", "text").with_keywords(["quantization", "cross-encoder"]);
        assert!(scorer(3).score("quant", &doc) > 0.0);
        assert!(scorer(3).score("cross-encoder-v2", &doc) > 0.0);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let doc = Document::new("a", "text").with_keywords(["bm25"]);
        assert_eq!(scorer(3).score("BM25", &doc), scorer(3).score("bm25", &doc));
    }

    #[test]
    fn test_score_never_negative_when_hits_exceed_corpus() {
        let doc = Document::new("a", "text").with_keywords(["rag", "lightrag", "ragas"]);
        let score = scorer(1).score("rag", &doc);
        assert!(score >= 0.0);
    }
}

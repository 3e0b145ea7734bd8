// file: src/retrieval/similarity.rs
// description: token-overlap stand-in for embedding similarity

use super::Scorer;
use super::tokenizer::token_set;
use crate::models::Document;

/// Jaccard overlap of query and content token sets, scaled by the
/// document's `embedding_norm`.
///
/// Stands in for embedding cosine similarity. Any replacement must stay
/// symmetric, bounded to `[0, embedding_norm]`, and deterministic, because
/// fusion only consumes the resulting rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JaccardScorer;

impl Scorer for JaccardScorer {
    fn score(&self, query: &str, document: &Document) -> f64 {
        let query_terms = token_set(query);
        let content_terms = token_set(&document.content);

        let intersection = query_terms.intersection(&content_terms).count();
        let union = query_terms.union(&content_terms).count();

        if union == 0 {
            return 0.0;
        }

        (intersection as f64 / union as f64) * document.embedding_norm
    }
}

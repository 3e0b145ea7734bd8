// file: src/retrieval/mod.rs
// description: hybrid lexical + similarity retrieval with rank fusion
// reference: internal module structure

pub mod fusion;
pub mod hybrid;
pub mod lexical;
pub mod similarity;
pub mod tokenizer;

use crate::models::Document;

/// Relevance of one document to a query. Implementations must be pure.
pub trait Scorer {
    fn score(&self, query: &str, document: &Document) -> f64;
}

pub use fusion::{RankList, rank_list, reciprocal_rank_fusion};
pub use hybrid::{HybridSearcher, SearchOutcome};
pub use lexical::Bm25Scorer;
pub use similarity::JaccardScorer;
pub use tokenizer::{token_set, tokenize};

// file: src/retrieval/fusion.rs
// description: rank derivation and Reciprocal Rank Fusion of two ranked lists
// reference: https://plg.uwaterloo.ca/~gvcormac/cormacksigir09-rrf.pdf

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// `(document_id, rank)` pairs in rank order, ranks 1-indexed.
pub type RankList = Vec<(String, usize)>;

/// Sort `(id, score)` pairs by score descending and assign 1-indexed ranks.
///
/// The sort is stable: equal scores keep their input (corpus) order, so the
/// first-seen document gets the better rank.
pub fn rank_list(scores: &[(String, f64)]) -> RankList {
    let mut ordered: Vec<&(String, f64)> = scores.iter().collect();
    ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, (id, _))| (id.clone(), idx + 1))
        .collect()
}

/// Reciprocal Rank Fusion of a lexical and a similarity ranking.
///
/// ```text
/// fused = 1 / (k + lexical_rank) + 1 / (k + similarity_rank)
/// ```
///
/// A document missing from one list is treated as ranked `missing_rank` on
/// that side rather than dropped. Output keeps first-seen order: lexical list
/// order, then ids that only appear in the similarity list. Scores are not
/// normalized.
pub fn reciprocal_rank_fusion(
    lexical: &[(String, usize)],
    similarity: &[(String, usize)],
    k: usize,
    missing_rank: usize,
) -> Vec<(String, f64)> {
    let lexical_ranks: HashMap<&str, usize> =
        lexical.iter().map(|(id, rank)| (id.as_str(), *rank)).collect();
    let similarity_ranks: HashMap<&str, usize> =
        similarity.iter().map(|(id, rank)| (id.as_str(), *rank)).collect();

    let mut seen = HashSet::new();
    let ids = lexical
        .iter()
        .chain(similarity.iter())
        .map(|(id, _)| id.as_str())
        .filter(|id| seen.insert(*id));

    let k = k as f64;
    ids.map(|id| {
        let lex = lexical_ranks.get(id).copied().unwrap_or(missing_rank) as f64;
        let sim = similarity_ranks.get(id).copied().unwrap_or(missing_rank) as f64;
        (id.to_string(), 1.0 / (k + lex) + 1.0 / (k + sim))
    })
    .collect()
}

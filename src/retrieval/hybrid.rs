// file: src/retrieval/hybrid.rs
// description: hybrid search assembler combining lexical and similarity rankings
// reference: Reciprocal Rank Fusion over BM25 and vector rankings

use super::Scorer;
use super::fusion::{rank_list, reciprocal_rank_fusion};
use super::lexical::Bm25Scorer;
use super::similarity::JaccardScorer;
use crate::config::RetrievalConfig;
use crate::corpus::Corpus;
use crate::models::{
    RetrievalMetadata, ScoredDocument, SearchHit, SearchRequest, SearchResponse,
};
use crate::utils::OperationTimer;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub const METHOD: &str = "hybrid_bm25_vector_rrf";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub hits: Vec<ScoredDocument>,
    pub metadata: RetrievalMetadata,
}

/// Scores a corpus with two independent scorers and fuses their rankings.
pub struct HybridSearcher<L = Bm25Scorer, S = JaccardScorer> {
    corpus: Arc<Corpus>,
    config: RetrievalConfig,
    lexical: L,
    similarity: S,
}

impl HybridSearcher {
    pub fn new(corpus: Arc<Corpus>, config: RetrievalConfig) -> Self {
        let lexical = Bm25Scorer::from_config(&config, corpus.len());
        Self {
            corpus,
            config,
            lexical,
            similarity: JaccardScorer,
        }
    }
}

impl<L: Scorer, S: Scorer> HybridSearcher<L, S> {
    /// Build a searcher around custom scorers, e.g. a real embedding model.
    pub fn with_scorers(corpus: Arc<Corpus>, config: RetrievalConfig, lexical: L, similarity: S) -> Self {
        Self {
            corpus,
            config,
            lexical,
            similarity,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Score every document, fuse the two rankings and keep the best `limit`.
    ///
    /// The output is sorted by fused score descending; documents with equal
    /// fused scores keep corpus order. `use_compact_mode` only changes the
    /// echoed embedding dimensionality.
    pub fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let timer = OperationTimer::quiet("hybrid_search");
        let limit = request.limit.unwrap_or(self.config.default_limit);
        let compact = request.use_compact_mode.unwrap_or(true);
        let documents = self.corpus.documents();

        info!(
            "Hybrid search: {:?} (limit: {}, compact: {})",
            request.query, limit, compact
        );

        let lexical_scores: Vec<(String, f64)> = documents
            .iter()
            .map(|doc| (doc.id.clone(), self.lexical.score(&request.query, doc)))
            .collect();
        let similarity_scores: Vec<(String, f64)> = documents
            .iter()
            .map(|doc| (doc.id.clone(), self.similarity.score(&request.query, doc)))
            .collect();

        let lexical_ranks = rank_list(&lexical_scores);
        let similarity_ranks = rank_list(&similarity_scores);

        let fused: HashMap<String, f64> = reciprocal_rank_fusion(
            &lexical_ranks,
            &similarity_ranks,
            self.config.rrf_k,
            self.config.missing_rank,
        )
        .into_iter()
        .collect();

        let lexical_rank_of: HashMap<&str, usize> = lexical_ranks
            .iter()
            .map(|(id, rank)| (id.as_str(), *rank))
            .collect();
        let similarity_rank_of: HashMap<&str, usize> = similarity_ranks
            .iter()
            .map(|(id, rank)| (id.as_str(), *rank))
            .collect();

        let mut hits: Vec<ScoredDocument> = lexical_scores
            .iter()
            .zip(similarity_scores.iter())
            .map(|((id, lexical_score), (_, similarity_score))| ScoredDocument {
                document_id: id.clone(),
                lexical_score: *lexical_score,
                similarity_score: *similarity_score,
                fused_score: fused.get(id).copied().unwrap_or(0.0),
                lexical_rank: lexical_rank_of.get(id.as_str()).copied().unwrap_or(self.config.missing_rank),
                similarity_rank: similarity_rank_of
                    .get(id.as_str())
                    .copied()
                    .unwrap_or(self.config.missing_rank),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(limit);

        for hit in &hits {
            debug!(
                "{}: lexical={:.4} (#{}), similarity={:.4} (#{}), fused={:.5}",
                hit.document_id,
                hit.lexical_score,
                hit.lexical_rank,
                hit.similarity_score,
                hit.similarity_rank,
                hit.fused_score
            );
        }

        let elapsed = timer.finish_with_count(documents.len());

        SearchOutcome {
            hits,
            metadata: RetrievalMetadata {
                method: METHOD.to_string(),
                total_candidates: documents.len(),
                fusion_k: self.config.rrf_k,
                lexical_weight: 0.5,
                similarity_weight: 0.5,
                compact_mode: compact,
                embedding_dimensions: if compact {
                    self.config.compact_dimensions
                } else {
                    self.config.full_dimensions
                },
                execution_time_ms: elapsed.as_secs_f64() * 1000.0,
            },
        }
    }

    /// Run a search and join the hits back to their documents.
    pub fn respond(&self, request: &SearchRequest) -> SearchResponse {
        let outcome = self.search(request);
        let documents = outcome
            .hits
            .iter()
            .filter_map(|hit| {
                self.corpus
                    .get(&hit.document_id)
                    .map(|doc| SearchHit::from_scored(doc, hit))
            })
            .collect();

        SearchResponse {
            documents,
            retrieval_metadata: outcome.metadata,
        }
    }
}

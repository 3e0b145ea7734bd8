// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod graph;
pub mod search_result;

pub use document::Document;
pub use graph::{GraphEdge, GraphNode, NodeKind};
pub use search_result::{
    RankBreakdown, RetrievalMetadata, ScoreBreakdown, ScoredDocument, SearchHit, SearchRequest,
    SearchResponse,
};

// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod grading;
pub mod graph;
pub mod mcp;
pub mod models;
pub mod rerank;
pub mod retrieval;
pub mod routing;
pub mod utils;

pub use api::{AglaService, ApiReply, GraphSearchRequest, RerankRequest, RouteRequest, Tool, dispatch};
pub use cache::{CacheOperation, CacheReply, CacheRequest, SemanticCache};
pub use config::{CacheConfig, Config, CorpusConfig, GradingConfig, GraphConfig, RetrievalConfig};
pub use corpus::Corpus;
pub use error::{AglaError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use grading::{Grade, GradeKind, GradeOutcome, GradeRequest, Grader};
pub use graph::{GraphSearchOutcome, GraphSearcher, KnowledgeGraph};
pub use models::{Document, GraphEdge, GraphNode, NodeKind, SearchHit, SearchRequest, SearchResponse};
pub use rerank::{RerankInput, RerankMode, RerankOutcome, Reranker};
pub use retrieval::{Bm25Scorer, HybridSearcher, JaccardScorer, Scorer, reciprocal_rank_fusion};
pub use routing::{Route, RouteDecision, SemanticRouter};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

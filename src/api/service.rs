// file: src/api/service.rs
// description: shared AGLA service state behind the JSON, MCP and CLI surfaces

use super::requests::{GraphSearchRequest, RerankRequest, RouteRequest};
use crate::cache::{CacheReply, CacheRequest, SemanticCache};
use crate::config::{Config, GraphConfig};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::grading::{GradeOutcome, GradeRequest, Grader};
use crate::graph::{GraphSearchOutcome, GraphSearcher, KnowledgeGraph};
use crate::models::{SearchRequest, SearchResponse};
use crate::rerank::{RerankOutcome, Reranker};
use crate::retrieval::HybridSearcher;
use crate::routing::{RouteDecision, SemanticRouter};
use crate::utils::{HealthCheck, HealthReport, OperationTimer, Validator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

pub struct AglaService {
    searcher: HybridSearcher,
    router: SemanticRouter,
    reranker: Reranker,
    graph_searcher: GraphSearcher,
    grader: Grader,
    cache: Arc<Mutex<SemanticCache>>,
    graph_config: GraphConfig,
}

impl AglaService {
    /// Build the service from configuration, loading corpus and graph files
    /// when configured and falling back to the builtin data otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        for path in [&config.corpus.documents_path, &config.corpus.graph_path]
            .into_iter()
            .flatten()
        {
            Validator::validate_json_file(path)?;
        }

        let corpus = Corpus::load_or_builtin(config.corpus.documents_path.as_deref())?;
        let graph = KnowledgeGraph::load_or_builtin(config.corpus.graph_path.as_deref())?;
        info!(
            "AGLA service ready: {} documents, {} graph nodes",
            corpus.len(),
            graph.nodes().len()
        );
        Ok(Self::new(config, Arc::new(corpus), Arc::new(graph)))
    }

    pub fn new(config: &Config, corpus: Arc<Corpus>, graph: Arc<KnowledgeGraph>) -> Self {
        Self {
            searcher: HybridSearcher::new(corpus, config.retrieval.clone()),
            router: SemanticRouter::new(),
            reranker: Reranker::new(),
            graph_searcher: GraphSearcher::new(graph),
            grader: Grader::new(config.grading.max_retries),
            cache: Arc::new(Mutex::new(SemanticCache::new(
                Duration::from_secs(config.cache.ttl_secs),
                config.cache.max_key_len,
            ))),
            graph_config: config.graph.clone(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        self.searcher.corpus()
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        self.graph_searcher.graph()
    }

    pub fn hybrid_search(&self, request: &SearchRequest) -> SearchResponse {
        self.searcher.respond(request)
    }

    pub fn semantic_route(&self, request: &RouteRequest) -> RouteDecision {
        self.router.route(&request.query)
    }

    pub fn rerank(&self, request: &RerankRequest) -> Result<RerankOutcome> {
        self.reranker
            .rerank(&request.query, &request.documents, request.mode)
    }

    pub fn graph_search(&self, request: &GraphSearchRequest) -> Result<GraphSearchOutcome> {
        let depth = request.depth.unwrap_or(self.graph_config.default_depth);
        Validator::validate_depth(depth, self.graph_config.max_depth)?;
        Ok(self.graph_searcher.search(&request.query, depth))
    }

    pub fn grade(&self, request: &GradeRequest) -> Result<GradeOutcome> {
        self.grader.grade(request)
    }

    pub async fn semantic_cache(&self, request: &CacheRequest) -> Result<CacheReply> {
        self.cache.lock().await.handle(request)
    }

    pub async fn health(&self) -> HealthReport {
        let mut checks = Vec::new();

        let timer = OperationTimer::quiet("corpus_health");
        let documents = self.corpus().len();
        checks.push(if documents == 0 {
            HealthCheck::unhealthy("corpus", "corpus has no documents".to_string(), timer.elapsed())
        } else {
            HealthCheck::healthy("corpus", Some(format!("{} documents", documents)), timer.elapsed())
        });

        let timer = OperationTimer::quiet("graph_health");
        let graph = self.graph();
        let summary = format!("{} nodes, {} edges", graph.nodes().len(), graph.edges().len());
        checks.push(if graph.nodes().is_empty() {
            HealthCheck::degraded("knowledge_graph", summary, timer.elapsed())
        } else {
            HealthCheck::healthy("knowledge_graph", Some(summary), timer.elapsed())
        });

        let timer = OperationTimer::quiet("cache_health");
        let cached = self.cache.lock().await.len();
        checks.push(HealthCheck::healthy(
            "semantic_cache",
            Some(format!("{} entries", cached)),
            timer.elapsed(),
        ));

        HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::HealthStatus;

    fn service() -> AglaService {
        AglaService::from_config(&Config::default_config()).unwrap()
    }

    #[test]
    fn test_graph_depth_defaults_and_limits() {
        let service = service();
        let outcome = service.graph_search(&GraphSearchRequest::default()).unwrap();
        assert_eq!(outcome.graph_metadata.depth_requested, 2);

        let too_deep = GraphSearchRequest {
            query: "agla".to_string(),
            depth: Some(6),
        };
        assert!(service.graph_search(&too_deep).unwrap_err().is_client_error());
    }

    #[test]
    fn test_route_uses_query() {
        let decision = service().semantic_route(&RouteRequest {
            query: "compare hybrid search and graph search".to_string(),
        });
        assert_eq!(decision.query_analysis.original_query, "compare hybrid search and graph search");
    }

    #[tokio::test]
    async fn test_health_reports_builtin_data() {
        let report = service().health().await;
        assert_eq!(report.overall_status, HealthStatus::Healthy);
        assert_eq!(report.checks.len(), 3);
    }
}

// file: src/routing/mod.rs
// description: semantic query router choosing the fast, graph or complex tool path
// reference: three-way query classification ahead of retrieval

use crate::extractor::extract_domain_terms;
use serde::{Deserialize, Serialize};
use tracing::info;

const COMPLEX_MARKERS: &[&str] = &[
    "compare",
    "analyze",
    "explain how",
    "relationship between",
    "multi-hop",
];

const GRAPH_MARKERS: &[&str] = &[
    "connected",
    "related",
    "architecture",
    "setup",
    "how does",
    "how is",
    "rag",
];

/// Queries longer than this many characters always take the complex path.
const COMPLEX_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Fast,
    Graph,
    Complex,
}

impl Route {
    pub fn reasoning(self) -> &'static str {
        match self {
            Route::Complex => {
                "Query requires deep analysis, multi-step reasoning, or comparison. Full AGLA pipeline engaged."
            }
            Route::Graph => {
                "Query involves entity relationships or system architecture. Graph traversal recommended."
            }
            Route::Fast => "Simple factual query. Hybrid search sufficient.",
        }
    }

    pub fn confidence(self) -> f64 {
        match self {
            Route::Complex => 0.85,
            Route::Graph => 0.88,
            Route::Fast => 0.92,
        }
    }

    pub fn complexity_score(self) -> f64 {
        match self {
            Route::Complex => 0.9,
            Route::Graph => 0.6,
            Route::Fast => 0.3,
        }
    }

    /// Tool names the agent should call, in call order.
    pub fn recommended_tools(self) -> Vec<&'static str> {
        match self {
            Route::Complex => vec![
                "semantic_cache",
                "graph_search",
                "hybrid_search",
                "rerank",
                "grade",
            ],
            Route::Graph => vec!["semantic_cache", "graph_search", "hybrid_search", "grade"],
            Route::Fast => vec!["semantic_cache", "hybrid_search", "grade"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub token_count: usize,
    pub complexity_score: f64,
    pub entities_detected: Vec<String>,
    pub recommended_tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub route: Route,
    pub reasoning: String,
    pub confidence: f64,
    pub query_analysis: QueryAnalysis,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticRouter;

impl SemanticRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, query: &str) -> Route {
        let lower = query.to_lowercase();

        if COMPLEX_MARKERS.iter().any(|m| lower.contains(m)) || query.chars().count() > COMPLEX_LENGTH {
            Route::Complex
        } else if GRAPH_MARKERS.iter().any(|m| lower.contains(m)) {
            Route::Graph
        } else {
            Route::Fast
        }
    }

    pub fn route(&self, query: &str) -> RouteDecision {
        let route = self.classify(query);
        info!("Semantic route for {:?}: {:?}", query, route);

        RouteDecision {
            route,
            reasoning: route.reasoning().to_string(),
            confidence: route.confidence(),
            query_analysis: QueryAnalysis {
                original_query: query.to_string(),
                token_count: query.split_whitespace().count(),
                complexity_score: route.complexity_score(),
                entities_detected: extract_domain_terms(query),
                recommended_tools: route
                    .recommended_tools()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_markers() {
        let router = SemanticRouter::new();
        assert_eq!(router.classify("Compare BM25 and vectors"), Route::Complex);
        assert_eq!(router.classify("explain how fusion works"), Route::Complex);
        assert_eq!(router.classify(&"x".repeat(201)), Route::Complex);
        assert_eq!(router.classify(&"x".repeat(200)), Route::Fast);
    }

    #[test]
    fn test_complex_wins_over_graph() {
        let router = SemanticRouter::new();
        assert_eq!(
            router.classify("analyze the RAG architecture"),
            Route::Complex
        );
    }

    #[test]
    fn test_graph_markers() {
        let router = SemanticRouter::new();
        assert_eq!(router.classify("How does LightRAG work?"), Route::Graph);
        assert_eq!(router.classify("what is related to caching"), Route::Graph);
    }

    #[test]
    fn test_fast_default() {
        let router = SemanticRouter::new();
        assert_eq!(router.classify("what is the cache ttl"), Route::Fast);
        assert_eq!(router.classify(""), Route::Fast);
    }

    #[test]
    fn test_route_decision_analysis() {
        let decision = SemanticRouter::new().route("How does hybrid search use BM25");
        assert_eq!(decision.route, Route::Graph);
        assert_eq!(decision.confidence, 0.88);
        assert_eq!(decision.query_analysis.token_count, 6);
        assert_eq!(decision.query_analysis.complexity_score, 0.6);
        assert_eq!(
            decision.query_analysis.entities_detected,
            vec!["hybrid", "search", "bm25"]
        );
        assert_eq!(
            decision.query_analysis.recommended_tools,
            vec!["semantic_cache", "graph_search", "hybrid_search", "grade"]
        );
    }

    #[test]
    fn test_route_serializes_lowercase() {
        let json = serde_json::to_value(Route::Complex).unwrap();
        assert_eq!(json, "complex");
    }
}

// file: src/graph/knowledge.rs
// description: in-memory knowledge graph with builtin AGLA concepts
// reference: LightRAG entity/relationship graph

use crate::error::{AglaError, Result};
use crate::models::{GraphEdge, GraphNode, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl KnowledgeGraph {
    /// Rejects duplicate node ids and edges whose endpoints are unknown.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self> {
        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(AglaError::Corpus(format!("duplicate graph node id: {}", node.id)));
            }
        }

        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(AglaError::Corpus(format!(
                        "edge {} -[{}]-> {} references unknown node {}",
                        edge.source, edge.relationship, edge.target, endpoint
                    )));
                }
            }
        }

        Ok(Self { nodes, edges })
    }

    pub fn builtin() -> Self {
        use NodeKind::{Concept, Entity};

        let nodes = vec![
            GraphNode::new("n1", Entity, "GenTel", "TacticDev GenTel AI Assistant"),
            GraphNode::new("n2", Concept, "AGLA", "Adaptive Graph-Lite Architecture"),
            GraphNode::new("n3", Concept, "LightRAG", "Lightweight graph-based RAG"),
            GraphNode::new("n4", Concept, "Hybrid Search", "BM25 + Vector + RRF"),
            GraphNode::new("n5", Concept, "Semantic Routing", "3-way query classification"),
            GraphNode::new("n6", Concept, "FlashRank", "Fast neural reranking"),
            GraphNode::new("n7", Concept, "Self-RAG", "Self-reflective RAG with grading"),
            GraphNode::new("n8", Concept, "CRAG", "Corrective RAG with retry"),
            GraphNode::new("n9", Concept, "Binary Quantization", "32x vector compression"),
            GraphNode::new("n10", Concept, "MRL", "Matryoshka Representation Learning"),
            GraphNode::new("n11", Concept, "Semantic Cache", "Query-response caching"),
            GraphNode::new("n12", Concept, "RRF", "Reciprocal Rank Fusion"),
        ];

        let edges = vec![
            GraphEdge::new("n1", "n2", "implements", 0.98),
            GraphEdge::new("n2", "n3", "uses", 0.95),
            GraphEdge::new("n2", "n4", "uses", 0.96),
            GraphEdge::new("n2", "n5", "starts_with", 0.99),
            GraphEdge::new("n2", "n6", "reranks_with", 0.92),
            GraphEdge::new("n2", "n7", "validates_with", 0.94),
            GraphEdge::new("n7", "n8", "combined_with", 0.93),
            GraphEdge::new("n2", "n9", "optimizes_with", 0.91),
            GraphEdge::new("n9", "n10", "combined_with", 0.89),
            GraphEdge::new("n2", "n11", "caches_with", 0.88),
            GraphEdge::new("n4", "n12", "fuses_with", 0.97),
            GraphEdge::new("n3", "n2", "powers", 0.94),
            GraphEdge::new("n5", "n3", "routes_to", 0.90),
            GraphEdge::new("n5", "n4", "routes_to", 0.90),
        ];

        Self { nodes, edges }
    }

    /// Load `{"nodes": [...], "edges": [...]}` from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AglaError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: KnowledgeGraph = serde_json::from_str(&raw).map_err(|e| {
            AglaError::Corpus(format!("failed to parse {}: {}", path.display(), e))
        })?;

        let graph = Self::new(parsed.nodes, parsed.edges)?;
        info!(
            "Loaded knowledge graph from {}: {} nodes, {} edges",
            path.display(),
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

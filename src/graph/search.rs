// file: src/graph/search.rs
// description: dual-level graph retrieval: entity expansion (micro) and theme synthesis (macro)
// reference: LightRAG dual-level retrieval

use super::knowledge::KnowledgeGraph;
use crate::models::{GraphEdge, GraphNode, NodeKind};
use crate::retrieval::tokenize;
use crate::utils::OperationTimer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_THEMES: usize = 3;
const MAX_SYNTHESIS_CONCEPTS: usize = 5;

/// Nodes and the edges that reached them.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph<'g> {
    pub entities: Vec<&'g GraphNode>,
    pub edges: Vec<&'g GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroResults {
    pub entities: Vec<EntitySummary>,
    pub entity_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroResults {
    pub themes: Vec<String>,
    pub synthesis: String,
    pub theme_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRagResults {
    pub micro: MicroResults,
    #[serde(rename = "macro")]
    pub macro_level: MacroResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub entity: String,
    pub relationship: String,
    pub target: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub depth_requested: usize,
    pub nodes_visited: usize,
    pub edges_traversed: usize,
    /// Share of graph nodes retrieved, rounded to a whole percent.
    pub graph_coverage_percent: f64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSearchOutcome {
    pub lightrag_results: LightRagResults,
    pub relationships: Vec<Relationship>,
    pub graph_metadata: GraphMetadata,
}

pub struct GraphSearcher {
    graph: Arc<KnowledgeGraph>,
}

impl GraphSearcher {
    pub fn new(graph: Arc<KnowledgeGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    /// Seed nodes whose name or description matches a query token, then
    /// expand breadth-first along edges in either direction for `depth` hops.
    pub fn micro_retrieval(&self, query: &str, depth: usize) -> Subgraph<'_> {
        let terms = tokenize(query);
        let graph = self.graph.as_ref();

        let mut entities: Vec<&GraphNode> = graph
            .nodes()
            .iter()
            .filter(|node| {
                let name = node.name.to_lowercase();
                let description = node.description().unwrap_or("").to_lowercase();
                terms.iter().any(|term| {
                    name.contains(term.as_str())
                        || description.contains(term.as_str())
                        || term.contains(name.as_str())
                })
            })
            .collect();
        let mut edges: Vec<&GraphEdge> = Vec::new();

        let mut visited: HashSet<&str> = entities.iter().map(|n| n.id.as_str()).collect();
        let mut frontier: Vec<&GraphNode> = entities.clone();

        for hop in 0..depth {
            let mut next_frontier = Vec::new();

            for node in &frontier {
                for edge in graph.edges() {
                    let neighbor = if edge.source == node.id && !visited.contains(edge.target.as_str()) {
                        Some(edge.target.as_str())
                    } else if edge.target == node.id && !visited.contains(edge.source.as_str()) {
                        Some(edge.source.as_str())
                    } else {
                        None
                    };

                    if let Some(found) = neighbor.and_then(|id| graph.node(id)) {
                        visited.insert(found.id.as_str());
                        next_frontier.push(found);
                        entities.push(found);
                        edges.push(edge);
                    }
                }
            }

            debug!("Graph hop {}: {} new nodes", hop + 1, next_frontier.len());
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }

        Subgraph { entities, edges }
    }

    /// The most connected retrieved nodes become themes.
    pub fn macro_synthesis(subgraph: &Subgraph<'_>) -> MacroResults {
        let mut degree: Vec<(&str, usize)> = Vec::new();
        for edge in &subgraph.edges {
            for endpoint in [edge.source.as_str(), edge.target.as_str()] {
                match degree.iter_mut().find(|(id, _)| *id == endpoint) {
                    Some((_, count)) => *count += 1,
                    None => degree.push((endpoint, 1)),
                }
            }
        }
        degree.sort_by(|a, b| b.1.cmp(&a.1));

        let themes: Vec<String> = degree
            .iter()
            .take(MAX_THEMES)
            .filter_map(|(id, _)| subgraph.entities.iter().find(|e| e.id == *id))
            .map(|node| node.name.clone())
            .collect();

        let concepts: Vec<&str> = subgraph
            .entities
            .iter()
            .filter(|e| e.kind == NodeKind::Concept)
            .map(|e| e.name.as_str())
            .take(MAX_SYNTHESIS_CONCEPTS)
            .collect();

        let synthesis = if themes.is_empty() {
            "No strong thematic connections found in the knowledge graph.".to_string()
        } else {
            format!(
                "The query relates to {} which form the core of the knowledge graph. \
                 Key concepts include: {}. These are interconnected through {} relationships.",
                themes.join(", "),
                concepts.join(", "),
                subgraph.edges.len()
            )
        };

        MacroResults {
            theme_count: themes.len(),
            themes,
            synthesis,
        }
    }

    pub fn search(&self, query: &str, depth: usize) -> GraphSearchOutcome {
        let timer = OperationTimer::quiet("graph_search");
        info!("Graph search: {:?} (depth: {})", query, depth);

        let subgraph = self.micro_retrieval(query, depth);
        let macro_level = Self::macro_synthesis(&subgraph);

        let relationships = subgraph
            .edges
            .iter()
            .map(|edge| Relationship {
                entity: self.name_of(&edge.source),
                relationship: edge.relationship.clone(),
                target: self.name_of(&edge.target),
                confidence: edge.weight,
            })
            .collect();

        let entities: Vec<EntitySummary> = subgraph
            .entities
            .iter()
            .map(|node| EntitySummary {
                name: node.name.clone(),
                kind: node.kind,
                description: node.description().map(str::to_string),
            })
            .collect();

        let total_nodes = self.graph.nodes().len();
        let coverage = if total_nodes == 0 {
            0.0
        } else {
            (entities.len() as f64 / total_nodes as f64 * 100.0).round()
        };
        let nodes_visited = entities.len();
        let edges_traversed = subgraph.edges.len();
        let elapsed = timer.finish_with_count(nodes_visited);

        GraphSearchOutcome {
            lightrag_results: LightRagResults {
                micro: MicroResults {
                    entity_count: entities.len(),
                    entities,
                },
                macro_level,
            },
            relationships,
            graph_metadata: GraphMetadata {
                depth_requested: depth,
                nodes_visited,
                edges_traversed,
                graph_coverage_percent: coverage,
                execution_time_ms: elapsed.as_secs_f64() * 1000.0,
            },
        }
    }

    fn name_of(&self, id: &str) -> String {
        self.graph
            .node(id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn searcher() -> GraphSearcher {
        GraphSearcher::new(Arc::new(KnowledgeGraph::builtin()))
    }

    fn names(subgraph: &Subgraph<'_>) -> Vec<String> {
        subgraph.entities.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_depth_zero_returns_only_seeds() {
        let searcher = searcher();
        let subgraph = searcher.micro_retrieval("flashrank", 0);
        assert_eq!(names(&subgraph), vec!["FlashRank"]);
        assert!(subgraph.edges.is_empty());
    }

    #[test]
    fn test_expansion_follows_both_directions() {
        let searcher = searcher();
        // MRL <- Binary Quantization <- AGLA
        let subgraph = searcher.micro_retrieval("matryoshka", 2);
        assert_eq!(names(&subgraph), vec!["MRL", "Binary Quantization", "AGLA"]);
        assert_eq!(subgraph.edges.len(), 2);
        assert_eq!(subgraph.edges[0].relationship, "combined_with");
    }

    #[test]
    fn test_unmatched_query_is_empty() {
        let outcome = searcher().search("zebra", 2);
        assert_eq!(outcome.lightrag_results.micro.entity_count, 0);
        assert_eq!(outcome.lightrag_results.macro_level.theme_count, 0);
        assert_eq!(
            outcome.lightrag_results.macro_level.synthesis,
            "No strong thematic connections found in the knowledge graph."
        );
        assert_eq!(outcome.graph_metadata.graph_coverage_percent, 0.0);
    }

    #[test]
    fn test_macro_themes_rank_by_connectivity() {
        let searcher = searcher();
        let subgraph = searcher.micro_retrieval("matryoshka", 2);
        let macro_level = GraphSearcher::macro_synthesis(&subgraph);
        // Binary Quantization touches both edges
        assert_eq!(macro_level.themes[0], "Binary Quantization");
        assert_eq!(macro_level.theme_count, 3);
        assert!(macro_level.synthesis.contains("2 relationships"));
    }

    #[test]
    fn test_search_relationship_names() {
        let outcome = searcher().search("matryoshka", 1);
        assert_eq!(
            outcome.relationships,
            vec![Relationship {
                entity: "Binary Quantization".to_string(),
                relationship: "combined_with".to_string(),
                target: "MRL".to_string(),
                confidence: 0.89,
            }]
        );
        assert_eq!(outcome.graph_metadata.nodes_visited, 2);
        assert_eq!(outcome.graph_metadata.graph_coverage_percent, 17.0);
    }

    #[test]
    fn test_macro_serializes_under_macro_key() {
        let outcome = searcher().search("crag", 1);
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["lightrag_results"]["macro"]["themes"].is_array());
        assert_eq!(json["lightrag_results"]["micro"]["entities"][0]["type"], "concept");
    }
}

// file: src/models/graph.rs
// description: knowledge graph node and edge models
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entity,
    Concept,
    Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl GraphNode {
    pub fn new(id: &str, kind: NodeKind, name: &str, description: &str) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("description".to_string(), description.to_string());
        Self {
            id: id.to_string(),
            kind,
            name: name.to_string(),
            attributes,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.attributes.get("description").map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub weight: f64,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, relationship: &str, weight: f64) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            relationship: relationship.to_string(),
            weight,
        }
    }
}

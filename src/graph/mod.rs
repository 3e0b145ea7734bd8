// file: src/graph/mod.rs
// description: knowledge graph storage and LightRAG-style search
// reference: internal module structure

pub mod knowledge;
pub mod search;

pub use knowledge::KnowledgeGraph;
pub use search::{GraphSearchOutcome, GraphSearcher, Relationship, Subgraph};

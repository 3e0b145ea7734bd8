// file: src/api/requests.rs
// description: request bodies for the routing, rerank and graph tools
// reference: https://docs.rs/schemars

use crate::models::search_result::lenient_query;
use crate::rerank::{RerankInput, RerankMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct RouteRequest {
    /// Query to classify
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct RerankRequest {
    /// Query the passages are scored against
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,

    /// Passages as plain strings or objects with a `content` field
    #[serde(default)]
    pub documents: Vec<RerankInput>,

    /// "fast" (default) or "complex"
    #[serde(default)]
    pub mode: RerankMode,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GraphSearchRequest {
    /// Query used to seed entity matching
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,

    /// Expansion hops from the seed entities (default: 2)
    #[serde(default)]
    pub depth: Option<usize>,
}

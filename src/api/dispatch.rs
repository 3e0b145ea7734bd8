// file: src/api/dispatch.rs
// description: JSON-in / JSON-out tool dispatch with HTTP-style status codes
// reference: https://docs.rs/serde_json

use super::requests::{GraphSearchRequest, RerankRequest, RouteRequest};
use super::service::AglaService;
use crate::cache::CacheRequest;
use crate::error::{AglaError, Result};
use crate::grading::GradeRequest;
use crate::models::SearchRequest;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    HybridSearch,
    SemanticRoute,
    Rerank,
    GraphSearch,
    Grade,
    SemanticCache,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::HybridSearch,
        Tool::SemanticRoute,
        Tool::Rerank,
        Tool::GraphSearch,
        Tool::Grade,
        Tool::SemanticCache,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::HybridSearch => "hybrid_search",
            Tool::SemanticRoute => "semantic_route",
            Tool::Rerank => "rerank",
            Tool::GraphSearch => "graph_search",
            Tool::Grade => "grade",
            Tool::SemanticCache => "semantic_cache",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = AglaError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "semantic_router" => return Ok(Tool::SemanticRoute),
            "grader" => return Ok(Tool::Grade),
            _ => {}
        }
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| {
                let available: Vec<&str> = Tool::ALL.iter().map(|t| t.name()).collect();
                AglaError::UnknownTool(format!("{} (available: {})", name, available.join(", ")))
            })
    }
}

/// Status code plus `{ok, ...}` JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    /// Wrap a payload as `{ok: true, ...payload}`. Non-object payloads land under `result`.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        let mut body = Map::new();
        body.insert("ok".to_string(), Value::Bool(true));
        match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => body.extend(fields),
            Ok(other) => {
                body.insert("result".to_string(), other);
            }
            Err(e) => return Self::failure(&AglaError::from(e)),
        }
        Self {
            status: 200,
            body: Value::Object(body),
        }
    }

    pub fn failure(error: &AglaError) -> Self {
        Self {
            status: error.status_code(),
            body: json!({ "ok": false, "error": error.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Parse `body`, run `tool` against `service` and wrap the outcome.
pub async fn dispatch(service: &AglaService, tool: &str, body: &str) -> ApiReply {
    debug!("Dispatching {} ({} bytes)", tool, body.len());

    let reply = match tool.parse::<Tool>() {
        Ok(tool) => match parse_body(body) {
            Ok(value) => run(service, tool, value).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match reply {
        Ok(reply) => reply,
        Err(e) => {
            warn!("{} failed: {}", tool, e);
            ApiReply::failure(&e)
        }
    }
}

async fn run(service: &AglaService, tool: Tool, body: Value) -> Result<ApiReply> {
    let reply = match tool {
        Tool::HybridSearch => ApiReply::success(&service.hybrid_search(&request::<SearchRequest>(body)?)),
        Tool::SemanticRoute => ApiReply::success(&service.semantic_route(&request::<RouteRequest>(body)?)),
        Tool::Rerank => ApiReply::success(&service.rerank(&request::<RerankRequest>(body)?)?),
        Tool::GraphSearch => {
            ApiReply::success(&service.graph_search(&request::<GraphSearchRequest>(body)?)?)
        }
        Tool::Grade => ApiReply::success(&service.grade(&request::<GradeRequest>(body)?)?),
        Tool::SemanticCache => {
            ApiReply::success(&service.semantic_cache(&request::<CacheRequest>(body)?).await?)
        }
    };
    Ok(reply)
}

fn parse_body(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AglaError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(AglaError::InvalidRequest(
            "body must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

fn request<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| AglaError::InvalidRequest(e.to_string()))
}

// file: src/mcp/server.rs
// description: MCP server exposing the AGLA retrieval tools
// reference: https://docs.rs/rmcp

use crate::api::{AglaService, ApiReply, GraphSearchRequest, RerankRequest, RouteRequest};
use crate::cache::CacheRequest;
use crate::grading::GradeRequest;
use crate::models::SearchRequest;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AglaMcp {
    service: Arc<AglaService>,
    tool_router: ToolRouter<Self>,
}

/// Render a tool outcome as the `{ok: true, ...}` JSON text, or map the
/// failure onto an MCP error code.
fn envelope<T: Serialize>(outcome: crate::Result<T>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(payload) => {
            let reply = ApiReply::success(&payload);
            let text = serde_json::to_string_pretty(&reply.body)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(e) if e.is_client_error() => {
            warn!("MCP: rejected request: {}", e);
            Err(McpError::invalid_params(e.to_string(), None))
        }
        Err(e) => {
            warn!("MCP: tool failed: {}", e);
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}

#[tool_router]
impl AglaMcp {
    pub fn new(service: Arc<AglaService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Hybrid BM25 + Jaccard retrieval over the AGLA corpus, fused with Reciprocal Rank Fusion (k=60)")]
    async fn hybrid_search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: hybrid_search {:?} (limit: {:?})", request.query, request.limit);
        envelope(Ok(self.service.hybrid_search(&request)))
    }

    #[tool(description = "Classify a query onto the fast, graph or complex retrieval path and list the tools to use")]
    async fn semantic_route(
        &self,
        Parameters(request): Parameters<RouteRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: semantic_route {:?}", request.query);
        envelope(Ok(self.service.semantic_route(&request)))
    }

    #[tool(description = "Rerank candidate passages against a query (mode: fast or complex)")]
    async fn rerank(
        &self,
        Parameters(request): Parameters<RerankRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: rerank {} passages", request.documents.len());
        envelope(self.service.rerank(&request))
    }

    #[tool(description = "LightRAG-style knowledge graph search: entity expansion plus theme synthesis")]
    async fn graph_search(
        &self,
        Parameters(request): Parameters<GraphSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: graph_search {:?} (depth: {:?})", request.query, request.depth);
        envelope(self.service.graph_search(&request))
    }

    #[tool(description = "Self-RAG/CRAG grading of retrieval relevance, hallucination risk or answer quality")]
    async fn grade(
        &self,
        Parameters(request): Parameters<GradeRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: grade {:?}", request.kind);
        envelope(self.service.grade(&request))
    }

    #[tool(description = "Look up (get) or store (set) a response in the semantic query cache")]
    async fn semantic_cache(
        &self,
        Parameters(request): Parameters<CacheRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: semantic_cache {:?}", request.operation);
        envelope(self.service.semantic_cache(&request).await)
    }
}

#[tool_handler]
impl ServerHandler for AglaMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "AGLA retrieval tools: start with semantic_route, check semantic_cache, \
                 then hybrid_search / graph_search, rerank, and grade the result."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

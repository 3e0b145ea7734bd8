// file: src/api/mod.rs
// description: tool service and JSON dispatch module exports
// reference: internal module structure

pub mod dispatch;
pub mod requests;
pub mod service;

pub use dispatch::{ApiReply, Tool, dispatch};
pub use requests::{GraphSearchRequest, RerankRequest, RouteRequest};
pub use service::AglaService;

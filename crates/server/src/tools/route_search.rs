//! route_search tool implementation.
//!
//! Answers itinerary searches from the route cache, falling back to the providers.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use routeagg_core::{SearchRequest, SearchResponse};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::service::SearchService;

/// Output structure for route_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouteSearchOutput {
    /// Matching routes and their aggregates.
    #[serde(flatten)]
    pub response: SearchResponse,
    /// Debug information.
    pub debug: DebugInfo,
}

/// Debug information.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DebugInfo {
    /// Whether the routes came from the cache.
    pub cache_hit: bool,
    /// Digest of the request's cache key.
    pub fingerprint: String,
}

/// Implementation of the route_search tool.
pub async fn search_impl(service: &SearchService, params: SearchRequest) -> Result<CallToolResult, McpError> {
    let fingerprint = params.fingerprint().digest();
    let outcome = service.search(&params).await?;

    tracing::info!(
        fingerprint = %fingerprint,
        cache_hit = outcome.cache_hit,
        routes = outcome.response.routes.len(),
        "route search completed"
    );

    let debug = DebugInfo { cache_hit: outcome.cache_hit, fingerprint };
    json_result(&RouteSearchOutput { response: outcome.response, debug })
}

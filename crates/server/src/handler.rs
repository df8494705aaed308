//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::service::SearchService;
use crate::tools::{ping_impl, purge_impl, search_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use routeagg_core::SearchRequest;

/// The main MCP server handler for routeagg.
#[derive(Clone)]
pub struct RouteAggServer {
    service: SearchService,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl RouteAggServer {
    /// Create a new server handler around a search service.
    pub fn new(service: SearchService) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    /// Search itineraries between two points.
    ///
    /// Served from the route cache when a fresh entry exists; otherwise every provider is queried.
    #[tool(
        description = "Search routes from origin to destination departing at origin_date_time. Optional filters: \
                       destination_date_time, max_price, min_time_limit. Set only_cached to skip providers."
    )]
    async fn route_search(&self, params: Parameters<SearchRequest>) -> Result<CallToolResult, McpError> {
        search_impl(&self.service, params.0).await
    }

    #[tool(description = "Check whether at least one route provider is available.")]
    async fn providers_ping(&self) -> Result<CallToolResult, McpError> {
        ping_impl(&self.service).await
    }

    #[tool(description = "Delete expired routes from the cache. Returns deleted and remaining counts.")]
    async fn cache_purge(&self) -> Result<CallToolResult, McpError> {
        purge_impl(&self.service).await
    }
}

impl ServerHandler for RouteAggServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "routeagg".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

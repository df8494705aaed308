//! MCP tool implementations.
//!
//! This module contains all tools exposed by the routeagg server.

pub mod cache_purge;
pub mod providers_ping;
pub mod route_search;

pub use cache_purge::purge_impl;
pub use providers_ping::ping_impl;
pub use route_search::search_impl;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialize a tool output as pretty JSON text content.
///
/// A serialization failure is a server fault and maps to an internal error.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

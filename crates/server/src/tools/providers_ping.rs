//! providers_ping tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::service::SearchService;

/// Output from the providers_ping tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProvidersPingOutput {
    /// True when at least one provider answered.
    pub available: bool,
}

pub async fn ping_impl(service: &SearchService) -> Result<CallToolResult, McpError> {
    let available = service.ping().await;
    json_result(&ProvidersPingOutput { available })
}

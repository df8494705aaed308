//! Unified error types for routeagg.
//!
//! A cache miss is not an error: lookups return [`crate::CacheLookup::Miss`].
//! Only storage and upstream faults are represented here.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the routeagg server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty origin).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The route store refused a write because it is at capacity.
    #[error("CACHE_ERROR: route store full ({capacity} slots)")]
    StorageFull { capacity: usize },

    /// No upstream provider is configured or reachable.
    #[error("PROVIDER_UNAVAILABLE: {0}")]
    ProviderUnavailable(String),

    /// Upstream provider returned something we could not use.
    #[error("PROVIDER_FAILED: {provider}: {reason}")]
    ProviderFailed { provider: String, reason: String },

    /// Upstream provider timed out.
    #[error("PROVIDER_TIMEOUT: {0}")]
    ProviderTimeout(String),

    /// Transport-level HTTP failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::StorageFull { .. } => (-32002, err.to_string()),
            Error::ProviderUnavailable(msg) => (-32020, msg.clone()),
            Error::ProviderFailed { .. } => (-32021, err.to_string()),
            Error::ProviderTimeout(msg) => (-32022, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ProviderFailed { provider: "provider-one".into(), reason: "bad json".into() };
        assert!(err.to_string().contains("PROVIDER_FAILED"));
        assert!(err.to_string().contains("provider-one"));
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn test_storage_full_display() {
        let err = Error::StorageFull { capacity: 8 };
        assert_eq!(err.to_string(), "CACHE_ERROR: route store full (8 slots)");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let mcp_err: McpError = Error::InvalidInput("origin".into()).into();
        assert_eq!(mcp_err.code.0, -32602);

        let mcp_err: McpError = Error::ProviderTimeout("provider-two".into()).into();
        assert_eq!(mcp_err.code.0, -32022);
        assert_eq!(mcp_err.message, "provider-two");
    }
}

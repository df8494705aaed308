//! Provider client error types.

use std::sync::Arc;

use routeagg_core::Error;

/// Errors from upstream route provider clients.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Base URL missing or not parseable.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

impl ProviderError {
    /// Convert into the unified error, tagging it with the provider name.
    pub fn into_error(self, provider: &str) -> Error {
        match self {
            ProviderError::Timeout => Error::ProviderTimeout(provider.to_string()),
            ProviderError::Network(e) => Error::HttpError(format!("{provider}: {e}")),
            ProviderError::InvalidBaseUrl(reason) | ProviderError::Parse(reason) => {
                Error::ProviderFailed { provider: provider.to_string(), reason }
            }
        }
    }
}

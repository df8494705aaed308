//! Provider one client.
//!
//! Flat route records (`from`/`to`/`dateFrom`/`dateTo`). Accepts arrival time
//! and price bounds in the search body.

pub mod request;
pub mod response;

pub use request::ProviderOneSearchRequest;
pub use response::{ProviderOneRoute, ProviderOneSearchResponse};

use async_trait::async_trait;
use routeagg_core::{Route, SearchRequest};

use crate::ProviderError;
use crate::provider::{ProviderConfig, ProviderHttp, RouteProvider};

const PROVIDER_NAME: &str = "provider-one";

/// Provider one API client.
#[derive(Debug, Clone)]
pub struct ProviderOneClient {
    http: ProviderHttp,
}

impl ProviderOneClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self { http: ProviderHttp::new(&config)? })
    }
}

#[async_trait]
impl RouteProvider for ProviderOneClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Route>, ProviderError> {
        let body = ProviderOneSearchRequest::from(request);
        let response: Option<ProviderOneSearchResponse> = self.http.post_search(PROVIDER_NAME, &body).await?;
        let routes = response.map(ProviderOneSearchResponse::into_routes).unwrap_or_default();
        tracing::debug!(provider = PROVIDER_NAME, routes = routes.len(), "provider search completed");
        Ok(routes)
    }

    async fn ping(&self) -> bool {
        self.http.ping(PROVIDER_NAME).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_missing_base_url() {
        let result = ProviderOneClient::new(ProviderConfig::default());
        assert!(matches!(result, Err(ProviderError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_client_name() {
        let client = ProviderOneClient::new(ProviderConfig::new("http://localhost:9001")).unwrap();
        assert_eq!(client.name(), "provider-one");
    }
}

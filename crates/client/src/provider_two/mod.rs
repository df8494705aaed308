//! Provider two client.
//!
//! Nested departure/arrival points. Accepts only a time-limit bound in the
//! search body, so price and arrival filters are applied after aggregation.

pub mod request;
pub mod response;

pub use request::ProviderTwoSearchRequest;
pub use response::{ProviderTwoRoute, ProviderTwoSearchResponse};

use async_trait::async_trait;
use routeagg_core::{Route, SearchRequest};

use crate::ProviderError;
use crate::provider::{ProviderConfig, ProviderHttp, RouteProvider};

const PROVIDER_NAME: &str = "provider-two";

/// Provider two API client.
#[derive(Debug, Clone)]
pub struct ProviderTwoClient {
    http: ProviderHttp,
}

impl ProviderTwoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self { http: ProviderHttp::new(&config)? })
    }
}

#[async_trait]
impl RouteProvider for ProviderTwoClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Route>, ProviderError> {
        let body = ProviderTwoSearchRequest::from(request);
        let response: Option<ProviderTwoSearchResponse> = self.http.post_search(PROVIDER_NAME, &body).await?;
        let routes = response.map(ProviderTwoSearchResponse::into_routes).unwrap_or_default();
        tracing::debug!(provider = PROVIDER_NAME, routes = routes.len(), "provider search completed");
        Ok(routes)
    }

    async fn ping(&self) -> bool {
        self.http.ping(PROVIDER_NAME).await
    }
}

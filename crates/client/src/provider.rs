//! Provider abstraction and shared HTTP plumbing.
//!
//! Both providers expose the same two endpoints under a base URL:
//!
//! - `POST {base}/search` with a provider-specific JSON body
//! - `GET {base}/ping` answering 200 when available, 500 when not
//!
//! A non-success search status is logged and treated as "no routes"; transport,
//! timeout and body parse failures are returned as errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, header};
use routeagg_core::{Route, SearchRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::ProviderError;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "routeagg/0.1";

/// A source of routes for a search request.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Search the provider. Every returned route carries a fresh id.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Route>, ProviderError>;

    /// Whether the provider is currently available.
    async fn ping(&self) -> bool;
}

/// Provider client configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL, e.g. `http://provider-one:8080/api`.
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: routeagg/0.x).
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { base_url: String::new(), timeout: DEFAULT_TIMEOUT, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }
}

/// HTTP transport shared by the provider clients.
#[derive(Debug, Clone)]
pub(crate) struct ProviderHttp {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl ProviderHttp {
    pub(crate) fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.base_url.trim().is_empty() {
            return Err(ProviderError::InvalidBaseUrl("base URL is empty".into()));
        }
        Url::parse(&config.base_url).map_err(|e| ProviderError::InvalidBaseUrl(e.to_string()))?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub(crate) fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// POST a search body. `Ok(None)` means the provider answered with a non-success status.
    pub(crate) async fn post_search<B, R>(&self, provider: &str, body: &B) -> Result<Option<R>, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint("search");
        tracing::debug!(provider, %url, "searching provider");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.user_agent)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider, %status, "provider search returned non-success status");
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;
        Ok(Some(parsed))
    }

    pub(crate) async fn ping(&self, provider: &str) -> bool {
        let result = self
            .client
            .get(self.endpoint("ping"))
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await;

        match result {
            Ok(response) => interpret_ping(provider, response.status()),
            Err(e) => {
                tracing::warn!(provider, error = %e, "provider ping failed");
                false
            }
        }
    }
}

/// 200 is up, 500 is down; anything else is logged and judged by its class.
pub(crate) fn interpret_ping(provider: &str, status: StatusCode) -> bool {
    match status {
        StatusCode::OK => true,
        StatusCode::INTERNAL_SERVER_ERROR => false,
        other => {
            tracing::warn!(provider, status = %other, "unexpected ping status");
            other.is_success()
        }
    }
}

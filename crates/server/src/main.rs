//! routeagg server entry point.
//!
//! Boots the route aggregation MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use routeagg_client::{ProviderConfig, ProviderOneClient, ProviderTwoClient, RouteProvider};
use routeagg_core::{AppConfig, RouteCache};
use tracing_subscriber::EnvFilter;

mod handler;
mod service;
mod tools;

use service::SearchService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    if let Err(e) = config.require_any_provider() {
        tracing::warn!(error = %e, "no route providers configured; only cached results can be served");
    }

    let cache = Arc::new(match config.route_capacity() {
        Some(capacity) => RouteCache::with_route_capacity(capacity),
        None => RouteCache::new(),
    });
    let service = SearchService::new(cache, build_providers(&config)?);

    if let Some(interval) = config.purge_interval() {
        spawn_purge_task(service.clone(), interval);
    }

    tracing::info!("Starting routeagg server on stdio transport");

    let handler = handler::RouteAggServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}

fn build_providers(config: &AppConfig) -> Result<Vec<Arc<dyn RouteProvider>>> {
    let provider_config = |base_url: &str| ProviderConfig {
        base_url: base_url.to_string(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
    };

    let mut providers: Vec<Arc<dyn RouteProvider>> = Vec::new();
    if let Some(url) = &config.provider_one_url {
        providers.push(Arc::new(ProviderOneClient::new(provider_config(url))?));
    }
    if let Some(url) = &config.provider_two_url {
        providers.push(Arc::new(ProviderTwoClient::new(provider_config(url))?));
    }

    for provider in &providers {
        tracing::info!(provider = provider.name(), "route provider enabled");
    }
    Ok(providers)
}

fn spawn_purge_task(service: SearchService, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            service.purge_expired();
        }
    });
}

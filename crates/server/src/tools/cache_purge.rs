//! cache_purge tool implementation.
//!
//! Drops expired route slots. Request index entries stay; they read as stale
//! once their routes are gone.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::service::SearchService;

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of route slots deleted.
    pub deleted: usize,
    /// Route slots still held.
    pub routes_remaining: usize,
    /// Fingerprints in the request index.
    pub requests_indexed: usize,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(service: &SearchService) -> Result<CallToolResult, McpError> {
    let deleted = service.purge_expired();
    let stats = service.stats();
    json_result(&CachePurgeOutput { deleted, routes_remaining: stats.routes, requests_indexed: stats.requests })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::parse_output;
    use chrono::{Duration, TimeZone, Utc};
    use routeagg_core::{Route, RouteCache, SearchRequest, SearchResponse};
    use std::sync::Arc;
    use uuid::Uuid;

    fn route(time_limit: chrono::DateTime<Utc>) -> Route {
        let departure = Utc.with_ymd_and_hms(2027, 3, 1, 6, 0, 0).unwrap();
        Route {
            id: Uuid::new_v4(),
            origin: "Omsk".into(),
            destination: "Tomsk".into(),
            origin_date_time: departure,
            destination_date_time: departure + Duration::hours(4),
            price: 42.0,
            time_limit,
        }
    }

    #[tokio::test]
    async fn test_purge_expired_routes() {
        let cache = Arc::new(RouteCache::new());
        let request = SearchRequest::new("Omsk", "Tomsk", Utc.with_ymd_and_hms(2027, 3, 1, 6, 0, 0).unwrap());
        let now = Utc::now();
        let response = SearchResponse::new(vec![
            route(now - Duration::minutes(1)),
            route(now - Duration::minutes(2)),
            route(now + Duration::hours(1)),
        ]);
        cache.set(&request, &response).unwrap();

        let service = SearchService::new(cache, Vec::new());
        let output: CachePurgeOutput = parse_output(&purge_impl(&service).await.unwrap());
        assert_eq!(output.deleted, 2);
        assert_eq!(output.routes_remaining, 1);
        assert_eq!(output.requests_indexed, 1);
    }

    #[tokio::test]
    async fn test_purge_empty_cache() {
        let service = SearchService::new(Arc::new(RouteCache::new()), Vec::new());
        let output: CachePurgeOutput = parse_output(&purge_impl(&service).await.unwrap());
        assert_eq!(output.deleted, 0);
        assert_eq!(output.routes_remaining, 0);
    }
}

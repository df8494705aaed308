//! Search orchestration.
//!
//! A search is answered from the cache when possible. On a miss every configured
//! provider is queried concurrently, the combined routes are filtered, cached and
//! returned. A single failing provider fails the whole search and nothing is cached.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use routeagg_client::RouteProvider;
use routeagg_core::{CacheLookup, CacheStats, Error, RouteCache, SearchRequest, SearchResponse};

/// Result of a search together with where it came from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub response: SearchResponse,
    pub cache_hit: bool,
}

/// Cache-first search over a set of route providers.
#[derive(Clone)]
pub struct SearchService {
    cache: Arc<RouteCache>,
    providers: Vec<Arc<dyn RouteProvider>>,
}

impl SearchService {
    pub fn new(cache: Arc<RouteCache>, providers: Vec<Arc<dyn RouteProvider>>) -> Self {
        Self { cache, providers }
    }

    /// Run a search.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` for a blank origin or destination
    /// - `Error::ProviderUnavailable` when a fan-out is needed but no provider is configured
    /// - the mapped provider error when any provider fails
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, Error> {
        request.validate()?;

        if let CacheLookup::Hit(routes) = self.cache.get(request) {
            return Ok(SearchOutcome { response: SearchResponse::new(routes), cache_hit: true });
        }

        if request.only_cached {
            tracing::debug!(fingerprint = %request.fingerprint(), "cache-only search missed");
            return Ok(SearchOutcome { response: SearchResponse::empty(), cache_hit: false });
        }

        if self.providers.is_empty() {
            return Err(Error::ProviderUnavailable("no route providers configured".into()));
        }

        let searches = self.providers.iter().map(|provider| async move {
            provider.search(request).await.map_err(|e| e.into_error(provider.name()))
        });
        let batches = try_join_all(searches).await?;

        let routes = batches.into_iter().flatten().filter(|route| request.accepts(route)).collect();
        let response = SearchResponse::new(routes);

        if let Err(e) = self.cache.set(request, &response) {
            tracing::warn!(fingerprint = %request.fingerprint(), error = %e, "failed to cache search result");
        }

        Ok(SearchOutcome { response, cache_hit: false })
    }

    /// True when at least one provider reports itself available.
    pub async fn ping(&self) -> bool {
        let answers = join_all(self.providers.iter().map(|provider| provider.ping())).await;
        answers.into_iter().any(|up| up)
    }

    /// Drop expired route slots, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let deleted = self.cache.purge_expired();
        if deleted > 0 {
            tracing::debug!(deleted, "purged expired routes");
        }
        deleted
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use routeagg_client::ProviderError;
    use routeagg_core::{Route, SearchFilters};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct FakeProvider {
        name: &'static str,
        prices: Vec<f64>,
        time_limit: DateTime<Utc>,
        fail: bool,
        up: bool,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn with_prices(name: &'static str, prices: &[f64]) -> Self {
            Self {
                name,
                prices: prices.to_vec(),
                time_limit: Utc::now() + Duration::hours(6),
                fail: false,
                up: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self { fail: true, ..Self::with_prices(name, &[]) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RouteProvider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn search(&self, request: &SearchRequest) -> Result<Vec<Route>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Parse("unexpected body".into()));
            }
            Ok(self
                .prices
                .iter()
                .map(|&price| Route {
                    id: Uuid::new_v4(),
                    origin: request.origin.clone(),
                    destination: request.destination.clone(),
                    origin_date_time: request.origin_date_time,
                    destination_date_time: request.origin_date_time + Duration::hours(2),
                    price,
                    time_limit: self.time_limit,
                })
                .collect())
        }

        async fn ping(&self) -> bool {
            self.up
        }
    }

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 12, 1, 8, 0, 0).unwrap()
    }

    fn request() -> SearchRequest {
        SearchRequest::new("Moscow", "Sochi", departure())
    }

    fn build(providers: &[Arc<FakeProvider>]) -> SearchService {
        let providers = providers.iter().map(|p| p.clone() as Arc<dyn RouteProvider>).collect();
        SearchService::new(Arc::new(RouteCache::new()), providers)
    }

    #[tokio::test]
    async fn test_miss_fans_out_then_hits() {
        let one = Arc::new(FakeProvider::with_prices("one", &[100.0, 200.0]));
        let two = Arc::new(FakeProvider::with_prices("two", &[150.0]));
        let service = build(&[one.clone(), two.clone()]);

        let first = service.search(&request()).await.unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.response.routes.len(), 3);
        assert_eq!(first.response.min_price, 100.0);
        assert_eq!(first.response.max_price, 200.0);

        let second = service.search(&request()).await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(second.response.routes.len(), 3);
        assert_eq!(one.calls(), 1);
        assert_eq!(two.calls(), 1);
    }

    #[tokio::test]
    async fn test_only_cached_miss_skips_providers() {
        let one = Arc::new(FakeProvider::with_prices("one", &[100.0]));
        let service = build(&[one.clone()]);

        let request = SearchRequest { only_cached: true, ..request() };
        let outcome = service.search(&request).await.unwrap();
        assert!(!outcome.cache_hit);
        assert!(outcome.response.is_empty());
        assert_eq!(one.calls(), 0);
    }

    #[tokio::test]
    async fn test_only_cached_hit() {
        let one = Arc::new(FakeProvider::with_prices("one", &[100.0]));
        let service = build(&[one.clone()]);

        service.search(&request()).await.unwrap();
        let outcome = service.search(&SearchRequest { only_cached: true, ..request() }).await.unwrap();
        assert!(outcome.cache_hit);
        assert_eq!(outcome.response.routes.len(), 1);
        assert_eq!(one.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_and_caches_nothing() {
        let one = Arc::new(FakeProvider::with_prices("one", &[100.0]));
        let two = Arc::new(FakeProvider::failing("two"));
        let service = build(&[one, two]);

        let result = service.search(&request()).await;
        assert!(matches!(result, Err(Error::ProviderFailed { provider, .. }) if provider == "two"));
        assert_eq!(service.stats().requests, 0);
        assert_eq!(service.stats().routes, 0);
    }

    #[tokio::test]
    async fn test_filters_apply_to_fresh_results() {
        let one = Arc::new(FakeProvider::with_prices("one", &[50.0, 150.0, 99.0]));
        let service = build(&[one]);

        let request = request().with_filters(SearchFilters { max_price: Some(100.0), ..Default::default() });
        let outcome = service.search(&request).await.unwrap();
        assert_eq!(outcome.response.routes.len(), 2);
        assert!(outcome.response.routes.iter().all(|r| r.price < 100.0));
    }

    #[tokio::test]
    async fn test_empty_result_is_cached() {
        let one = Arc::new(FakeProvider::with_prices("one", &[]));
        let service = build(&[one.clone()]);

        let first = service.search(&request()).await.unwrap();
        assert!(first.response.is_empty());
        let second = service.search(&request()).await.unwrap();
        assert!(second.cache_hit);
        assert!(second.response.is_empty());
        assert_eq!(one.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_providers() {
        let result = build(&[]).search(&request()).await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_fan_out() {
        let one = Arc::new(FakeProvider::with_prices("one", &[100.0]));
        let service = build(&[one.clone()]);

        let result = service.search(&SearchRequest::new("", "Sochi", departure())).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(one.calls(), 0);
    }

    #[tokio::test]
    async fn test_ping_any_available() {
        let down = Arc::new(FakeProvider { up: false, ..FakeProvider::with_prices("one", &[]) });
        let up = Arc::new(FakeProvider::with_prices("two", &[]));

        assert!(!build(&[down.clone()]).ping().await);
        assert!(build(&[down, up]).ping().await);
        assert!(!build(&[]).ping().await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let stale = FakeProvider {
            time_limit: Utc::now() - Duration::minutes(5),
            ..FakeProvider::with_prices("one", &[1.0, 2.0])
        };
        let service = build(&[Arc::new(stale)]);

        service.search(&request()).await.unwrap();
        assert_eq!(service.stats().routes, 2);
        assert_eq!(service.purge_expired(), 2);
        assert_eq!(service.stats().routes, 0);
        assert_eq!(service.stats().requests, 1);
    }
}

//! Cache façade combining the route store and the request index.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::request_index::{CacheMap, RequestIndex, UpsertOutcome};
use super::route_store::{RouteSlot, RouteStore};
use crate::{Error, Route, SearchFilters, SearchRequest, SearchResponse};

/// How long a confirmed-empty result is served from cache (5 minutes).
pub const EMPTY_RESULT_TTL_SECS: i64 = 300;

/// Outcome of a cache lookup.
///
/// `Hit(vec![])` means "cached and empty", which callers must not confuse with `Miss`.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Miss,
    Hit(Vec<Route>),
}

impl CacheLookup {
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheLookup::Miss)
    }

    /// Routes for a hit, `None` for a miss.
    pub fn into_routes(self) -> Option<Vec<Route>> {
        match self {
            CacheLookup::Miss => None,
            CacheLookup::Hit(routes) => Some(routes),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Route slots held, including sentinels and expired slots not yet purged.
    pub routes: usize,
    /// Fingerprints indexed.
    pub requests: usize,
}

/// Request-aware route cache.
///
/// Thread-safe; share it behind an `Arc`. Every operation is synchronous and
/// only holds a shard lock for the duration of one map access.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes: RouteStore,
    requests: RequestIndex,
}

impl RouteCache {
    /// Creates a cache with an unbounded route store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache whose route store holds at most `capacity` slots.
    pub fn with_route_capacity(capacity: usize) -> Self {
        Self { routes: RouteStore::with_capacity_limit(capacity), requests: RequestIndex::new() }
    }

    /// Resolve a request against the cache at the current instant.
    pub fn get(&self, request: &SearchRequest) -> CacheLookup {
        self.get_at(request, Utc::now())
    }

    /// Resolve a request against the cache as of `now`.
    pub fn get_at(&self, request: &SearchRequest, now: DateTime<Utc>) -> CacheLookup {
        let fingerprint = request.fingerprint();

        let Some(entry) = self.requests.lookup(&fingerprint) else {
            tracing::debug!(fingerprint = %fingerprint.digest(), "cache miss: fingerprint not indexed");
            return CacheLookup::Miss;
        };

        if !filters_compatible(entry.filters.as_ref(), request.filters.as_ref()) {
            tracing::debug!(fingerprint = %fingerprint.digest(), "cache miss: stored filters differ");
            return CacheLookup::Miss;
        }

        let lookup = self.validate(&entry, request.filters.as_ref(), now);
        tracing::debug!(
            fingerprint = %fingerprint.digest(),
            hit = !lookup.is_miss(),
            total = entry.route_ids.len(),
            "cache entry validated"
        );
        lookup
    }

    /// Collect the live routes of an entry and apply the quorum rule.
    fn validate(&self, entry: &CacheMap, filters: Option<&SearchFilters>, now: DateTime<Utc>) -> CacheLookup {
        let mut survivors = Vec::with_capacity(entry.route_ids.len());

        for id in &entry.route_ids {
            match self.routes.get(id, now) {
                // Sentinel entries never hold real ids.
                Some(RouteSlot::Sentinel) => return CacheLookup::Hit(Vec::new()),
                Some(RouteSlot::Route(route)) => {
                    if filters.is_none_or(|f| f.matches(&route)) {
                        survivors.push(route);
                    }
                }
                None => {}
            }
        }

        if meets_quorum(entry.route_ids.len(), survivors.len()) {
            CacheLookup::Hit(survivors)
        } else {
            CacheLookup::Miss
        }
    }

    /// Persist a fan-out result at the current instant.
    ///
    /// # Errors
    ///
    /// Propagates route store failures unchanged. The index may already hold the
    /// new entry at that point; missing routes then read as expired.
    pub fn set(&self, request: &SearchRequest, response: &SearchResponse) -> Result<(), Error> {
        self.set_at(request, response, Utc::now())
    }

    /// Persist a fan-out result as of `now`.
    ///
    /// # Errors
    ///
    /// See [`RouteCache::set`].
    pub fn set_at(&self, request: &SearchRequest, response: &SearchResponse, now: DateTime<Utc>) -> Result<(), Error> {
        let fingerprint = request.fingerprint();
        let digest = fingerprint.digest();

        if response.routes.is_empty() {
            self.routes.ensure_room(1)?;
            let sentinel = Uuid::new_v4();
            let entry = CacheMap { written_at: now, route_ids: vec![sentinel], filters: request.filters.clone() };
            let outcome = self.requests.upsert(fingerprint, entry, |existing, _| should_replace(existing, now));
            self.routes.put_sentinel(sentinel, now + Duration::seconds(EMPTY_RESULT_TTL_SECS))?;
            log_upsert(&digest, outcome, 0);
            return Ok(());
        }

        // Refuse the whole batch up front so a full store never leaves a partial entry behind.
        self.routes.ensure_room(response.routes.len())?;

        let route_ids = response.routes.iter().map(|route| route.id).collect();
        let entry = CacheMap { written_at: now, route_ids, filters: request.filters.clone() };
        let outcome = self.requests.upsert(fingerprint, entry, |existing, _| should_replace(existing, now));

        for route in &response.routes {
            self.routes.put(route.id, route.clone(), route.time_limit)?;
        }

        log_upsert(&digest, outcome, response.routes.len());
        Ok(())
    }

    /// Drop expired route slots. Index entries are left in place.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        self.routes.purge_expired(now)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { routes: self.routes.len(), requests: self.requests.len() }
    }
}

/// A stored entry can serve a request when it was written without filters or with the same ones.
fn filters_compatible(stored: Option<&SearchFilters>, requested: Option<&SearchFilters>) -> bool {
    match stored {
        None => true,
        Some(stored) => requested == Some(stored),
    }
}

/// More than half of the entry lost, or nothing left of a non-empty entry, means stale.
fn meets_quorum(total: usize, survivors: usize) -> bool {
    if total != 0 && survivors == 0 {
        return false;
    }
    total - survivors <= total / 2
}

/// Conflict rule for writes to an occupied fingerprint.
///
/// Compares the stored timestamp against the instant of the write. That instant is
/// also the incoming entry's `written_at`, fixed before the upsert so the resolver
/// stays pure under retries. Concurrent writers are therefore ordered by timestamp,
/// not by arrival. Ties keep the existing entry.
fn should_replace(existing: &CacheMap, now: DateTime<Utc>) -> bool {
    existing.written_at < now
}

fn log_upsert(digest: &str, outcome: UpsertOutcome, routes: usize) {
    match outcome {
        UpsertOutcome::Kept => tracing::debug!(fingerprint = %digest, routes, "cache write lost conflict, entry kept"),
        UpsertOutcome::Inserted | UpsertOutcome::Replaced => {
            tracing::debug!(fingerprint = %digest, routes, ?outcome, "cache entry written")
        }
    }
}

//! Route storage with per-route absolute expiration.
//!
//! Knows nothing about requests. Expired slots read as absent and are
//! dropped lazily on read or in bulk by [`RouteStore::purge_expired`].

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::{Error, Route};

/// Value stored under a route id.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSlot {
    /// Marks a request that was answered with zero routes.
    Sentinel,
    Route(Route),
}

#[derive(Debug, Clone)]
struct StoredSlot {
    slot: RouteSlot,
    expires_at: DateTime<Utc>,
}

impl StoredSlot {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Concurrent route store.
///
/// Thread-safe and sharded; writers to different ids do not contend.
#[derive(Debug, Default)]
pub struct RouteStore {
    slots: DashMap<Uuid, StoredSlot>,
    capacity: Option<usize>,
}

impl RouteStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses new ids once `capacity` slots are held.
    ///
    /// The limit is soft: concurrent writers may overshoot it by a few slots.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self { slots: DashMap::with_capacity(capacity), capacity: Some(capacity) }
    }

    /// Stores a route until `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageFull` when the store is at its capacity limit.
    pub fn put(&self, id: Uuid, route: Route, expires_at: DateTime<Utc>) -> Result<(), Error> {
        self.insert(id, RouteSlot::Route(route), expires_at)
    }

    /// Stores the empty-result marker until `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageFull` when the store is at its capacity limit.
    pub fn put_sentinel(&self, id: Uuid, expires_at: DateTime<Utc>) -> Result<(), Error> {
        self.insert(id, RouteSlot::Sentinel, expires_at)
    }

    /// Checks that `additional` new slots fit under the capacity limit.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageFull` when the batch would exceed the limit.
    pub fn ensure_room(&self, additional: usize) -> Result<(), Error> {
        if let Some(capacity) = self.capacity
            && self.slots.len().saturating_add(additional) > capacity
        {
            return Err(Error::StorageFull { capacity });
        }
        Ok(())
    }

    fn insert(&self, id: Uuid, slot: RouteSlot, expires_at: DateTime<Utc>) -> Result<(), Error> {
        if let Some(capacity) = self.capacity
            && self.slots.len() >= capacity
            && !self.slots.contains_key(&id)
        {
            return Err(Error::StorageFull { capacity });
        }

        self.slots.insert(id, StoredSlot { slot, expires_at });
        Ok(())
    }

    /// Reads a live slot. Never-stored and expired ids both resolve to `None`.
    pub fn get(&self, id: &Uuid, now: DateTime<Utc>) -> Option<RouteSlot> {
        match self.slots.get(id) {
            Some(stored) if !stored.is_expired(now) => return Some(stored.slot.clone()),
            Some(_) => {}
            None => return None,
        }

        self.slots.remove_if(id, |_, stored| stored.is_expired(now));
        None
    }

    /// Removes every expired slot and returns how many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.slots.retain(|_, stored| {
            let keep = !stored.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of slots held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn make_route() -> Route {
        Route {
            id: Uuid::new_v4(),
            origin: "Moscow".into(),
            destination: "Sochi".into(),
            origin_date_time: now(),
            destination_date_time: now() + Duration::hours(3),
            price: 42.0,
            time_limit: now() + Duration::hours(1),
        }
    }

    #[test]
    fn test_put_get() {
        let store = RouteStore::new();
        let route = make_route();
        store.put(route.id, route.clone(), route.time_limit).unwrap();
        assert_eq!(store.get(&route.id, now()), Some(RouteSlot::Route(route)));
    }

    #[test]
    fn test_get_missing() {
        let store = RouteStore::new();
        assert!(store.get(&Uuid::new_v4(), now()).is_none());
    }

    #[test]
    fn test_expiration_is_inclusive() {
        let store = RouteStore::new();
        let route = make_route();
        store.put(route.id, route.clone(), now()).unwrap();
        assert!(store.get(&route.id, now()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_live_until_expiry() {
        let store = RouteStore::new();
        let route = make_route();
        store.put(route.id, route.clone(), route.time_limit).unwrap();
        assert!(store.get(&route.id, route.time_limit - Duration::seconds(1)).is_some());
        assert!(store.get(&route.id, route.time_limit).is_none());
    }

    #[test]
    fn test_sentinel_distinct_from_absence() {
        let store = RouteStore::new();
        let id = Uuid::new_v4();
        store.put_sentinel(id, now() + Duration::minutes(5)).unwrap();
        assert_eq!(store.get(&id, now()), Some(RouteSlot::Sentinel));
        assert!(store.get(&id, now() + Duration::minutes(5)).is_none());
    }

    #[test]
    fn test_purge_expired() {
        let store = RouteStore::new();
        let stale = make_route();
        let fresh = make_route();
        store.put(stale.id, stale.clone(), now()).unwrap();
        store.put(fresh.id, fresh.clone(), now() + Duration::hours(1)).unwrap();
        store.put_sentinel(Uuid::new_v4(), now() - Duration::seconds(1)).unwrap();

        assert_eq!(store.purge_expired(now()), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh.id, now()).is_some());
    }

    #[test]
    fn test_capacity_limit() {
        let store = RouteStore::with_capacity_limit(1);
        let first = make_route();
        let second = make_route();
        store.put(first.id, first.clone(), first.time_limit).unwrap();

        let result = store.put(second.id, second.clone(), second.time_limit);
        assert!(matches!(result, Err(Error::StorageFull { capacity: 1 })));

        // Overwriting an existing id does not need a new slot.
        assert!(store.put(first.id, first.clone(), first.time_limit).is_ok());
    }

    #[test]
    fn test_ensure_room() {
        let store = RouteStore::with_capacity_limit(3);
        let route = make_route();
        store.put(route.id, route.clone(), route.time_limit).unwrap();

        assert!(store.ensure_room(2).is_ok());
        assert!(matches!(store.ensure_room(3), Err(Error::StorageFull { capacity: 3 })));
        assert!(RouteStore::new().ensure_room(usize::MAX).is_ok());
    }
}

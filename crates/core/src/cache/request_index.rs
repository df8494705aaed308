//! Fingerprint to route-id index.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::Fingerprint;
use crate::SearchFilters;

/// Index record for one fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheMap {
    /// When the write happened; used to resolve write conflicts.
    pub written_at: DateTime<Utc>,
    /// Route ids produced by that write, in provider order.
    pub route_ids: Vec<Uuid>,
    /// Filters in effect for that write. `None` means the widest result for the fingerprint.
    pub filters: Option<SearchFilters>,
}

/// Result of [`RequestIndex::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
    Kept,
}

/// Concurrent fingerprint index.
///
/// Entries are only ever replaced, never removed.
#[derive(Debug, Default)]
pub struct RequestIndex {
    entries: DashMap<Fingerprint, Arc<CacheMap>>,
}

impl RequestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic read-modify-write against a single fingerprint.
    ///
    /// Installs `new_entry` when the key is vacant. Otherwise calls
    /// `should_replace(existing, &new_entry)` while holding the key's shard lock
    /// and installs `new_entry` only when it returns true. The resolver must be pure.
    pub fn upsert<F>(&self, fingerprint: Fingerprint, new_entry: CacheMap, should_replace: F) -> UpsertOutcome
    where
        F: Fn(&CacheMap, &CacheMap) -> bool,
    {
        match self.entries.entry(fingerprint) {
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(new_entry));
                UpsertOutcome::Inserted
            }
            Entry::Occupied(mut occupied) => {
                if should_replace(occupied.get(), &new_entry) {
                    occupied.insert(Arc::new(new_entry));
                    UpsertOutcome::Replaced
                } else {
                    UpsertOutcome::Kept
                }
            }
        }
    }

    /// Current entry for a fingerprint.
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<Arc<CacheMap>> {
        self.entries.get(fingerprint).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of fingerprints indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

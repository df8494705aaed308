//! In-memory route cache keyed by request fingerprint.
//!
//! Two concurrent stores cooperate behind [`RouteCache`]:
//!
//! - [`RouteStore`] holds individual routes, each with its own absolute expiration
//! - [`RequestIndex`] maps a request fingerprint to the route ids that request produced
//!
//! A request carrying refinement filters can reuse an entry written for an unfiltered
//! (or identically filtered) request. Partially expired entries stay usable while at
//! least half of their routes survive.
//!
//! The request index is never swept, so it grows for the lifetime of the process.
//! Route memory is reclaimed by [`RouteCache::purge_expired`].

pub mod engine;
pub mod fingerprint;
pub mod request_index;
pub mod route_store;

pub use crate::Error;

pub use engine::{CacheLookup, CacheStats, EMPTY_RESULT_TTL_SECS, RouteCache};
pub use fingerprint::Fingerprint;
pub use request_index::{CacheMap, RequestIndex, UpsertOutcome};
pub use route_store::{RouteSlot, RouteStore};

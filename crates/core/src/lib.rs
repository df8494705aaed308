//! Core types and shared functionality for routeagg.
//!
//! This crate provides:
//! - Route and search request/response types
//! - In-memory route cache keyed by request fingerprint
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{CacheLookup, CacheStats, Fingerprint, RouteCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{Route, SearchFilters, SearchRequest, SearchResponse};

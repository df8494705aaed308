//! Search request and refinement filters.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Route;
use crate::Error;
use crate::cache::Fingerprint;

/// Itinerary search request.
///
/// The mandatory fields identify the request for caching purposes.
/// Filters only refine the result set and never change the fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Start point of the route, e.g. "Moscow".
    pub origin: String,

    /// End point of the route, e.g. "Sochi".
    pub destination: String,

    /// Start date and time of the route.
    pub origin_date_time: DateTime<Utc>,

    /// Optional refinement filters.
    #[serde(default)]
    pub filters: Option<SearchFilters>,

    /// Answer from cached data only, never calling providers.
    #[serde(default)]
    pub only_cached: bool,
}

/// Optional refinement predicates applied to cached or fetched routes.
///
/// Equality is structural over the three bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchFilters {
    /// Exact end date and time of the route.
    #[serde(default)]
    pub destination_date_time: Option<DateTime<Utc>>,

    /// Exclusive upper bound on price.
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Exclusive lower bound on the route time limit.
    #[serde(default)]
    pub min_time_limit: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// Create a request without filters.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, origin_date_time: DateTime<Utc>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            origin_date_time,
            filters: None,
            only_cached: false,
        }
    }

    /// Attach refinement filters.
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Cache key derived from the mandatory fields only.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.origin, &self.destination, self.origin_date_time)
    }

    /// Whether a route passes this request's filters (always true without filters).
    pub fn accepts(&self, route: &Route) -> bool {
        self.filters.as_ref().is_none_or(|filters| filters.matches(route))
    }

    /// Validate the mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if origin or destination is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if self.origin.trim().is_empty() {
            return Err(Error::InvalidInput("origin cannot be empty".into()));
        }
        if self.destination.trim().is_empty() {
            return Err(Error::InvalidInput("destination cannot be empty".into()));
        }
        if let Some(max_price) = self.filters.as_ref().and_then(|f| f.max_price)
            && max_price.is_nan()
        {
            return Err(Error::InvalidInput("max_price must be a number".into()));
        }
        Ok(())
    }
}

impl SearchFilters {
    /// Check a route against every bound that is set.
    pub fn matches(&self, route: &Route) -> bool {
        self.destination_date_time
            .is_none_or(|expected| route.destination_date_time == expected)
            && self.max_price.is_none_or(|max| route.price < max)
            && self.min_time_limit.is_none_or(|min| route.time_limit > min)
    }
}

//! Provider two search request body.

use chrono::{DateTime, Utc};
use routeagg_core::SearchRequest;
use serde::Serialize;

/// Search body understood by provider two.
///
/// Provider two only filters by time limit on its side.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTwoSearchRequest {
    /// Start point of the route.
    pub departure: String,
    /// End point of the route.
    pub arrival: String,
    /// Start date of the route.
    pub departure_date: DateTime<Utc>,
    /// Minimum value of the route time limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_time_limit: Option<DateTime<Utc>>,
}

impl From<&SearchRequest> for ProviderTwoSearchRequest {
    fn from(request: &SearchRequest) -> Self {
        Self {
            departure: request.origin.clone(),
            arrival: request.destination.clone(),
            departure_date: request.origin_date_time,
            min_time_limit: request.filters.as_ref().and_then(|f| f.min_time_limit),
        }
    }
}

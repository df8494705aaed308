//! Provider one search request body.

use chrono::{DateTime, Utc};
use routeagg_core::SearchRequest;
use serde::Serialize;

/// Search body understood by provider one.
///
/// Provider one filters by arrival time and price on its side.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOneSearchRequest {
    /// Start point of the route.
    pub from: String,
    /// End point of the route.
    pub to: String,
    /// Start date of the route.
    pub date_from: DateTime<Utc>,
    /// End date of the route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    /// Maximum price of the route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl From<&SearchRequest> for ProviderOneSearchRequest {
    fn from(request: &SearchRequest) -> Self {
        let filters = request.filters.as_ref();
        Self {
            from: request.origin.clone(),
            to: request.destination.clone(),
            date_from: request.origin_date_time,
            date_to: filters.and_then(|f| f.destination_date_time),
            max_price: filters.and_then(|f| f.max_price),
        }
    }
}

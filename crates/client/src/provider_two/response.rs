//! Provider two search response and route normalization.

use chrono::{DateTime, Utc};
use routeagg_core::Route;
use serde::Deserialize;
use uuid::Uuid;

/// Raw response from provider two.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderTwoSearchResponse {
    #[serde(default)]
    pub routes: Vec<ProviderTwoRoute>,
}

/// Route as described by provider two.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTwoRoute {
    pub departure: ProviderTwoPoint,
    pub arrival: ProviderTwoPoint,
    pub price: f64,
    pub time_limit: DateTime<Utc>,
}

/// Named point with its date, e.g. Moscow at 2026-11-02 15:00.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTwoPoint {
    pub point: String,
    pub date: DateTime<Utc>,
}

impl From<ProviderTwoRoute> for Route {
    fn from(raw: ProviderTwoRoute) -> Self {
        Route {
            id: Uuid::new_v4(),
            origin: raw.departure.point,
            destination: raw.arrival.point,
            origin_date_time: raw.departure.date,
            destination_date_time: raw.arrival.date,
            price: raw.price,
            time_limit: raw.time_limit,
        }
    }
}

impl ProviderTwoSearchResponse {
    pub fn into_routes(self) -> Vec<Route> {
        self.routes.into_iter().map(Route::from).collect()
    }
}

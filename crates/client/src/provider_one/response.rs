//! Provider one search response and route normalization.

use chrono::{DateTime, Utc};
use routeagg_core::Route;
use serde::Deserialize;
use uuid::Uuid;

/// Raw response from provider one.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderOneSearchResponse {
    #[serde(default)]
    pub routes: Vec<ProviderOneRoute>,
}

/// Route as described by provider one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOneRoute {
    pub from: String,
    pub to: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub price: f64,
    pub time_limit: DateTime<Utc>,
}

impl From<ProviderOneRoute> for Route {
    fn from(raw: ProviderOneRoute) -> Self {
        Route {
            id: Uuid::new_v4(),
            origin: raw.from,
            destination: raw.to,
            origin_date_time: raw.date_from,
            destination_date_time: raw.date_to,
            price: raw.price,
            time_limit: raw.time_limit,
        }
    }
}

impl ProviderOneSearchResponse {
    pub fn into_routes(self) -> Vec<Route> {
        self.routes.into_iter().map(Route::from).collect()
    }
}

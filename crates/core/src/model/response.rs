//! Routes and aggregated search responses.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single bookable itinerary returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Route {
    /// Identifier of the whole route, fresh per provider fetch.
    pub id: Uuid,
    /// Start point of the route.
    pub origin: String,
    /// End point of the route.
    pub destination: String,
    /// Start date and time.
    pub origin_date_time: DateTime<Utc>,
    /// End date and time.
    pub destination_date_time: DateTime<Utc>,
    /// Price of the route.
    pub price: f64,
    /// After this instant the route is no longer bookable.
    pub time_limit: DateTime<Utc>,
}

impl Route {
    /// Travel duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.destination_date_time - self.origin_date_time).num_minutes()
    }
}

/// Aggregated search result across providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
    /// Routes in provider order.
    pub routes: Vec<Route>,
    /// The cheapest route price (0 when empty).
    pub min_price: f64,
    /// The most expensive route price (0 when empty).
    pub max_price: f64,
    /// The fastest route in minutes (0 when empty).
    pub min_minutes_route: i64,
    /// The longest route in minutes (0 when empty).
    pub max_minutes_route: i64,
}

impl SearchResponse {
    /// Build a response and compute its aggregates.
    pub fn new(routes: Vec<Route>) -> Self {
        let min_price = routes.iter().map(|r| r.price).reduce(f64::min).unwrap_or(0.0);
        let max_price = routes.iter().map(|r| r.price).reduce(f64::max).unwrap_or(0.0);
        let min_minutes_route = routes.iter().map(Route::duration_minutes).min().unwrap_or(0);
        let max_minutes_route = routes.iter().map(Route::duration_minutes).max().unwrap_or(0);

        Self { routes, min_price, max_price, min_minutes_route, max_minutes_route }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

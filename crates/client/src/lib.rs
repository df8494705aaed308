//! Upstream route provider clients for routeagg.
//!
//! Each provider speaks its own JSON dialect; clients map requests out of and
//! routes back into the shared `routeagg-core` types.

pub mod error;
pub mod provider;
pub mod provider_one;
pub mod provider_two;

pub use error::ProviderError;
pub use provider::{ProviderConfig, RouteProvider};
pub use provider_one::ProviderOneClient;
pub use provider_two::ProviderTwoClient;

//! Search request and response types shared by providers, cache, and server.

mod request;
mod response;

pub use request::{SearchFilters, SearchRequest};
pub use response::{Route, SearchResponse};

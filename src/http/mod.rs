//! HTTP protocol layer module
//!
//! Response builders, query-string parsing, and the content-type and cache
//! helpers used by static image serving. Nothing here knows about heroes.

pub mod cache;
pub mod mime;
pub mod query;
pub mod response;

// Re-export commonly used items
pub use query::query_param;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_cached_response,
    build_health_response, build_options_response, build_text_response,
};

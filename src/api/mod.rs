// API module entry
// JSON endpoints over the hero catalog

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;

// Re-exported for the router tests
#[cfg(test)]
pub use types::ApiResponse;

/// Paginated hero listing
pub const HEROES_PATH: &str = "/boruto/heroes";
/// Hero name search
pub const SEARCH_PATH: &str = "/boruto/heroes/search";

/// API route handler
///
/// Returns `None` when `path` is not an API route so the caller can fall
/// through to its own routes.
pub fn handle_api_request(
    path: &str,
    query: Option<&str>,
    state: &AppState,
    is_head: bool,
) -> Option<Response<Full<Bytes>>> {
    match path {
        HEROES_PATH => Some(handlers::handle_list_heroes(state, query, is_head)),
        SEARCH_PATH => Some(handlers::handle_search_heroes(state, query, is_head)),
        _ => None,
    }
}

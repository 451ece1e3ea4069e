//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching, common headers, and access logging.

use crate::api;
use crate::config::{AppState, HttpConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Plain-text greeting served at `/`
pub const WELCOME_MESSAGE: &str = "Welcome to Boruto API!";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type: no route reads a request body.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _) = req.into_parts();

    let mut access_entry = state
        .access_log_enabled()
        .then(|| AccessLogEntry::from_request(&parts, remote_addr));

    let response = match check_http_method(&parts.method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: parts.uri.path(),
                query: parts.uri.query(),
                is_head: parts.method == Method::HEAD,
                if_none_match: parts
                    .headers
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            route_request(&ctx, &state).await
        }
    };

    let response = apply_common_headers(response, &state.config.http);

    if let Some(entry) = access_entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // 0. Health check endpoints (highest priority, always fast)
    let health = &state.config.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        return http::build_health_response(ctx.is_head);
    }

    // 1. Welcome text
    if ctx.path == "/" {
        return http::build_text_response(StatusCode::OK, WELCOME_MESSAGE, ctx.is_head);
    }

    // 2. Hero API
    if let Some(resp) = api::handle_api_request(ctx.path, ctx.query, state, ctx.is_head) {
        return resp;
    }

    // 3. Hero images
    if ctx.path.starts_with(static_files::IMAGES_PREFIX) {
        return static_files::serve_image(ctx, &state.config.static_files.images_dir).await;
    }

    // 4. Fallback
    http::build_404_response(ctx.is_head)
}

/// Add `Server` and, when enabled, CORS origin headers
fn apply_common_headers(
    mut response: Response<Full<Bytes>>,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    match HeaderValue::from_str(&http_config.server_name) {
        Ok(value) => {
            headers.insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!(
            "Invalid server_name '{}': {e}",
            http_config.server_name
        )),
    }
    if http_config.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::config::test_support::{test_state, test_state_with};
    use http_body_util::BodyExt;

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, Response<Full<Bytes>>) {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        let resp = handle_request(req, Arc::clone(state), None).await.unwrap();
        (resp.status(), resp)
    }

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get_json(state: &Arc<AppState>, uri: &str) -> (StatusCode, ApiResponse) {
        let (status, resp) = send(state, Method::GET, uri).await;
        assert_eq!(resp.headers()["content-type"], "application/json");
        (status, serde_json::from_str(&body_text(resp).await).unwrap())
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let state = test_state();
        let (status, resp) = send(&state, Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_text(resp).await, "Welcome to Boruto API!");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let state = test_state();
        for uri in ["/unknown", "/boruto", "/boruto/heroes/", "/images/"] {
            let (status, resp) = send(&state, Method::GET, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body_text(resp).await, "Page not Found", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_all_pages() {
        let state = test_state();
        let expected_links = [
            (None, Some(2)),
            (Some(1), Some(3)),
            (Some(2), Some(4)),
            (Some(3), Some(5)),
            (Some(4), None),
        ];
        for (page, links) in (1..=5).zip(expected_links) {
            let (status, body) = get_json(&state, &format!("/boruto/heroes?page={page}")).await;
            assert_eq!(status, StatusCode::OK);
            let expected = ApiResponse {
                last_updated: body.last_updated,
                ..ApiResponse::ok(state.repository.page(page).unwrap().to_vec(), links.0, links.1)
            };
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_page_errors() {
        let state = test_state();

        let (status, body) = get_json(&state, "/boruto/heroes?page=6").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ApiResponse::error("Heroes not found"));

        let (status, body) = get_json(&state, "/boruto/heroes?page=invalid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ApiResponse::error("Only numbers are allowed"));
    }

    #[tokio::test]
    async fn test_search_counts() {
        let state = test_state();
        for (uri, count) in [
            ("/boruto/heroes/search?name=sas", 1),
            ("/boruto/heroes/search?name=sa", 3),
            ("/boruto/heroes/search?name=", 0),
            ("/boruto/heroes/search", 0),
        ] {
            let (status, body) = get_json(&state, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body.heroes.len(), count, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_method_handling() {
        let state = test_state();

        let (status, resp) = send(&state, Method::POST, "/boruto/heroes").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");

        let (status, _) = send(&state, Method::OPTIONS, "/").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, resp) = send(&state, Method::HEAD, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_text(resp).await, "");
    }

    #[tokio::test]
    async fn test_health_probes() {
        let state = test_state();
        for uri in ["/healthz", "/readyz"] {
            let (status, resp) = send(&state, Method::GET, uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body_text(resp).await, "ok");
        }

        let disabled = test_state_with(|c| c.health.enabled = false);
        let (status, _) = send(&disabled, Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_common_headers() {
        let state = test_state();
        let (_, resp) = send(&state, Method::GET, "/boruto/heroes").await;
        assert_eq!(resp.headers()["server"], "Boruto-API/1.0");
        assert!(!resp.headers().contains_key("access-control-allow-origin"));

        let cors = test_state_with(|c| c.http.enable_cors = true);
        let (_, resp) = send(&cors, Method::GET, "/boruto/heroes").await;
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_serves_images() {
        let dir = std::env::temp_dir().join(format!("boruto_api_router_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("sasuke.jpg"), b"not really a jpeg").unwrap();
        let images_dir = dir.to_str().unwrap().to_string();
        let state = test_state_with(|c| c.static_files.images_dir = images_dir);

        let (status, resp) = send(&state, Method::GET, "/images/sasuke.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/jpeg");
        assert_eq!(body_text(resp).await, "not really a jpeg");

        let (status, resp) = send(&state, Method::GET, "/images/naruto.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, "Page not Found");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_access_log_enabled_still_serves() {
        let state = test_state_with(|c| {
            c.logging.access_log = true;
            c.logging.access_log_format = "common".to_string();
        });
        let (status, _) = send(&state, Method::GET, "/boruto/heroes?page=2").await;
        assert_eq!(status, StatusCode::OK);
    }
}

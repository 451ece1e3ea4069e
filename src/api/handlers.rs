// Hero endpoint handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::json_response;
use super::types::{ApiResponse, PageError};
use crate::config::AppState;
use crate::http::query_param;

/// Page served when the `page` parameter is absent
pub const DEFAULT_PAGE: i32 = 1;

/// Parse and range-check a raw `page` parameter
pub fn parse_page(raw: Option<&str>, page_count: i32) -> Result<i32, PageError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE);
    };
    let page = raw.parse::<i32>().map_err(|_| PageError::NotANumber)?;
    if (1..=page_count).contains(&page) {
        Ok(page)
    } else {
        Err(PageError::NotFound)
    }
}

/// Previous and next page numbers for a valid page
pub fn neighbors(page: i32, page_count: i32) -> (Option<i32>, Option<i32>) {
    let prev = (page > 1).then(|| page - 1);
    let next = (page < page_count).then(|| page + 1);
    (prev, next)
}

/// GET /boruto/heroes?page=<n>
pub fn handle_list_heroes(
    state: &AppState,
    query: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let repo = &state.repository;
    let raw_page = query_param(query, "page");

    let page = match parse_page(raw_page.as_deref(), repo.page_count()) {
        Ok(page) => page,
        Err(err) => return json_response(err.status(), &ApiResponse::from(err), is_head),
    };

    // parse_page only returns pages inside the catalog
    let Some(heroes) = repo.page(page) else {
        return json_response(
            PageError::NotFound.status(),
            &ApiResponse::from(PageError::NotFound),
            is_head,
        );
    };

    let (prev, next) = neighbors(page, repo.page_count());
    json_response(
        StatusCode::OK,
        &ApiResponse::ok(heroes.to_vec(), prev, next),
        is_head,
    )
}

/// GET /boruto/heroes/search?name=<q>
pub fn handle_search_heroes(
    state: &AppState,
    query: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let name = query_param(query, "name").unwrap_or_default();
    let heroes = state.repository.search(&name);
    json_response(StatusCode::OK, &ApiResponse::ok(heroes, None, None), is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::test_state;
    use http_body_util::BodyExt;

    async fn decode(resp: Response<Full<Bytes>>) -> (StatusCode, ApiResponse) {
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None, 5), Ok(1));
        assert_eq!(parse_page(Some("1"), 5), Ok(1));
        assert_eq!(parse_page(Some("5"), 5), Ok(5));
        assert_eq!(parse_page(Some("+3"), 5), Ok(3));
        assert_eq!(parse_page(Some("0"), 5), Err(PageError::NotFound));
        assert_eq!(parse_page(Some("6"), 5), Err(PageError::NotFound));
        assert_eq!(parse_page(Some("-2"), 5), Err(PageError::NotFound));
        assert_eq!(parse_page(Some("invalid"), 5), Err(PageError::NotANumber));
        assert_eq!(parse_page(Some(""), 5), Err(PageError::NotANumber));
        assert_eq!(parse_page(Some("2.5"), 5), Err(PageError::NotANumber));
        assert_eq!(parse_page(Some("99999999999"), 5), Err(PageError::NotANumber));
    }

    #[test]
    fn test_neighbors() {
        assert_eq!(neighbors(1, 5), (None, Some(2)));
        assert_eq!(neighbors(3, 5), (Some(2), Some(4)));
        assert_eq!(neighbors(5, 5), (Some(4), None));
        assert_eq!(neighbors(1, 1), (None, None));
    }

    #[tokio::test]
    async fn test_list_every_page() {
        let state = test_state();
        for page in 1..=5 {
            let query = format!("page={page}");
            let (status, body) = decode(handle_list_heroes(&state, Some(&query), false)).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.success);
            assert_eq!(body.message, "ok");
            assert_eq!(body.heroes, state.repository.page(page).unwrap().to_vec());
            assert_eq!((body.prev_page, body.next_page), neighbors(page, 5));
            assert!(body.last_updated.is_some());
        }
    }

    #[tokio::test]
    async fn test_list_defaults_to_first_page() {
        let state = test_state();
        let (status, body) = decode(handle_list_heroes(&state, None, false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.heroes[0].name, "Sasuke");
        assert_eq!(body.prev_page, None);
        assert_eq!(body.next_page, Some(2));
    }

    #[tokio::test]
    async fn test_list_errors() {
        let state = test_state();

        let (status, body) = decode(handle_list_heroes(&state, Some("page=6"), false)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ApiResponse::error("Heroes not found"));

        let (status, body) = decode(handle_list_heroes(&state, Some("page=invalid"), false)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ApiResponse::error("Only numbers are allowed"));
    }

    #[tokio::test]
    async fn test_search() {
        let state = test_state();
        for (query, expected) in [("name=sas", 1), ("name=sa", 3), ("name=SA", 3), ("name=", 0), ("", 0)] {
            let (status, body) = decode(handle_search_heroes(&state, Some(query), false)).await;
            assert_eq!(status, StatusCode::OK, "{query}");
            assert!(body.success);
            assert_eq!(body.heroes.len(), expected, "{query}");
            assert_eq!((body.prev_page, body.next_page), (None, None));
        }
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let state = test_state();
        let resp = handle_list_heroes(&state, Some("page=2"), true);
        assert_ne!(resp.headers()["content-length"], "0");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}

//! Static image serving module
//!
//! Resolves `/images/*` requests inside the configured images directory and
//! builds cacheable responses for them.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// URL prefix hero image links use
pub const IMAGES_PREFIX: &str = "/images/";

/// Serve a hero image; anything unresolvable is a plain 404
pub async fn serve_image(ctx: &RequestContext<'_>, images_dir: &str) -> Response<Full<Bytes>> {
    let Some(relative) = ctx.path.strip_prefix(IMAGES_PREFIX) else {
        return http::build_404_response(ctx.is_head);
    };

    match load_from_directory(images_dir, relative).await {
        Some((content, content_type)) => {
            build_image_response(content, content_type, ctx.if_none_match.as_deref(), ctx.is_head)
        }
        None => http::build_404_response(ctx.is_head),
    }
}

/// Map a URL-relative path to a file path, rejecting anything that is not a
/// plain descendant of the base directory
fn sanitize_relative_path(relative: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(relative).decode_utf8().ok()?;
    let candidate = Path::new(&*decoded);
    if decoded.is_empty()
        || !candidate
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(candidate.to_path_buf())
}

/// Load a file from the images directory
pub async fn load_from_directory(
    images_dir: &str,
    relative: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let Some(relative_path) = sanitize_relative_path(relative) else {
        logger::log_warning(&format!("Rejected image path: {relative}"));
        return None;
    };

    let base_canonical = match fs::canonicalize(images_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Images directory not found or inaccessible '{images_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let file_canonical = fs::canonicalize(base_canonical.join(&relative_path))
        .await
        .ok()?;
    if !file_canonical.starts_with(&base_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_canonical.display()
        ));
        return None;
    }
    if !fs::metadata(&file_canonical).await.ok()?.is_file() {
        return None;
    }

    match fs::read(&file_canonical).await {
        Ok(content) => Some((content, mime::content_type_for(&file_canonical))),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            None
        }
    }
}

/// Build an image response, answering 304 when the client copy is current
fn build_image_response(
    content: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }
    http::build_cached_response(Bytes::from(content), content_type, &etag, is_head)
}

//! Query-string parsing module
//!
//! Decodes `application/x-www-form-urlencoded` style query strings.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Decode a single query component (`+` is a space, then percent-decoding)
fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Look up the first value of `name` in a raw query string
///
/// A key without `=` yields an empty value. Returns `None` when the key is
/// absent or there is no query string at all.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

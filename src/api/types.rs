// API types module
// JSON envelope and the user-facing error kinds of the hero endpoints

use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::repository::Hero;

/// Uniform envelope for listing and search responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub prev_page: Option<i32>,
    pub next_page: Option<i32>,
    pub heroes: Vec<Hero>,
    /// Milliseconds since the Unix epoch at response time
    pub last_updated: Option<i64>,
}

impl ApiResponse {
    /// Successful response stamped with the current time
    pub fn ok(heroes: Vec<Hero>, prev_page: Option<i32>, next_page: Option<i32>) -> Self {
        Self {
            success: true,
            message: "ok".to_string(),
            prev_page,
            next_page,
            heroes,
            last_updated: Some(chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Failed response: no heroes, no neighbours, no timestamp
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            prev_page: None,
            next_page: None,
            heroes: Vec::new(),
            last_updated: None,
        }
    }
}

/// Why a `page` parameter was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// Parsed as an integer but no such page exists
    NotFound,
    /// Not an integer at all
    NotANumber,
}

impl PageError {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotANumber => StatusCode::BAD_REQUEST,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "Heroes not found",
            Self::NotANumber => "Only numbers are allowed",
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PageError {}

impl From<PageError> for ApiResponse {
    fn from(err: PageError) -> Self {
        Self::error(err.message())
    }
}

//! Request handler module
//!
//! Entry point for application requests: method validation, route dispatch,
//! common response headers, and serving hero images from disk.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

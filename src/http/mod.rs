//! HTTP client module with bounded redirect handling and error classification.

mod client;
mod error;

pub use client::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, HttpClient};
pub use error::FetchError;

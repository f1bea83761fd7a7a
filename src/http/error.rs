//! Error kinds raised while fetching a release binary.

use std::fmt;

/// Failures of a redirect-following download.
#[derive(Debug)]
pub enum FetchError {
    /// Final response was neither 200 nor a followed redirect.
    DownloadFailed { status: u16, url: String },
    /// The redirect chain exceeded the configured limit.
    TooManyRedirects { limit: usize, url: String },
    /// A 301/302 response without a usable `Location` header.
    InvalidRedirect { status: u16, url: String },
    /// Connection, DNS, TLS, timeout or body read failure.
    Transport { url: String, source: reqwest::Error },
}

impl FetchError {
    /// HTTP status for `DownloadFailed`, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::DownloadFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::DownloadFailed { status, url } => {
                write!(f, "Failed to download: {} ({})", status, url)
            }
            FetchError::TooManyRedirects { limit, url } => {
                write!(f, "Too many redirects (limit {}) at {}", limit, url)
            }
            FetchError::InvalidRedirect { status, url } => {
                write!(
                    f,
                    "Redirect ({}) from {} has no usable Location header",
                    status, url
                )
            }
            FetchError::Transport { url, source } => {
                if source.is_timeout() {
                    write!(f, "Request to {} timed out", url)
                } else {
                    write!(f, "Request to {} failed", url)
                }
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

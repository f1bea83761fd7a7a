//! HTTP client with explicit, bounded redirect handling.

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url};
use std::io::Write;
use std::time::Duration;

use super::error::FetchError;

/// Maximum number of redirects followed for a single download.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Request timeout covering connect, headers and body.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const USER_AGENT: &str = "cordsync-install";

/// HTTP client that follows 301/302 redirects itself, up to a limit.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_redirects: usize,
}

impl HttpClient {
    /// Wraps an existing reqwest Client.
    ///
    /// The client should be built with `Policy::none()`, otherwise reqwest
    /// follows redirects on its own and the limit here never applies.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Builds a client with redirects disabled and the given timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }

    pub fn max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = limit;
        self
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET, following 301/302 responses until a final answer.
    ///
    /// Only a 200 counts as success; every other status becomes
    /// [`FetchError::DownloadFailed`].
    #[tracing::instrument(skip(self))]
    pub async fn get_following_redirects(&self, url: &str) -> Result<Response> {
        let mut current =
            Url::parse(url).with_context(|| format!("Invalid download URL: {}", url))?;
        let mut followed = 0;

        loop {
            debug!("GET {}", current);
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: current.to_string(),
                    source,
                })?;

            let status = response.status();
            if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
                if followed >= self.max_redirects {
                    return Err(FetchError::TooManyRedirects {
                        limit: self.max_redirects,
                        url: current.to_string(),
                    }
                    .into());
                }
                let next = redirect_target(&current, &response)?;
                debug!("{} redirect to {}", status.as_u16(), next);
                current = next;
                followed += 1;
                continue;
            }

            if status != StatusCode::OK {
                return Err(FetchError::DownloadFailed {
                    status: status.as_u16(),
                    url: current.to_string(),
                }
                .into());
            }

            return Ok(response);
        }
    }

    /// Downloads `url` into the writer produced by `create_writer`.
    ///
    /// The writer is only created once a 200 response is in hand, so a
    /// failed status never touches the destination. Returns the byte count.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        let mut response = self.get_following_redirects(url).await?;
        let final_url = response.url().to_string();

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) =
            response
                .chunk()
                .await
                .map_err(|source| FetchError::Transport {
                    url: final_url.clone(),
                    source,
                })?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().context("Failed to flush downloaded file")?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}

/// Resolves the `Location` of a redirect against the URL that produced it.
fn redirect_target(current: &Url, response: &Response) -> Result<Url, FetchError> {
    let invalid = || FetchError::InvalidRedirect {
        status: response.status().as_u16(),
        url: current.to_string(),
    };

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(invalid)?;

    current.join(location.trim()).map_err(|_| invalid())
}

use anyhow::Result;
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, HttpClient};

pub const DEFAULT_OWNER: &str = "neco8";
pub const DEFAULT_REPO: &str = "cordsync";
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Everything one installer run needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Package root holding `package.json`; `dist/` is created under it.
    pub package_dir: PathBuf,
    /// Release version; read from `package.json` when absent.
    pub version: Option<String>,
    pub owner: String,
    pub repo: String,
    pub base_url: String,
    /// Override the detected OS tag (`darwin`, `linux`, `win32`).
    pub os: Option<String>,
    /// Override the detected architecture tag (`x64`, `arm64`).
    pub arch: Option<String>,
    pub max_redirects: usize,
    pub timeout: Duration,
}

impl InstallOptions {
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            version: None,
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            os: None,
            arch: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct Config {
    pub client: HttpClient,
    pub options: InstallOptions,
}

impl Config {
    pub fn new(options: InstallOptions) -> Result<Self> {
        debug!(
            "HTTP client: timeout {:?}, at most {} redirects",
            options.timeout, options.max_redirects
        );
        let client = HttpClient::with_timeout(options.timeout)?.max_redirects(options.max_redirects);

        Ok(Self { client, options })
    }
}

use std::path::{Path, PathBuf};

use crate::platform::PlatformTag;

pub const BINARY_STEM: &str = "cordsync";
pub const DIST_DIR: &str = "dist";

/// Release asset name, e.g. `cordsync-linux-x64` or `cordsync-windows-x64.exe`.
pub fn binary_name(tag: &PlatformTag) -> String {
    let suffix = if tag.is_windows() { ".exe" } else { "" };
    format!("{}-{}{}", BINARY_STEM, tag, suffix)
}

/// `{base}/{owner}/{repo}/releases/download/v{version}/{binary_name}`
pub fn download_url(
    base_url: &str,
    owner: &str,
    repo: &str,
    version: &str,
    binary_name: &str,
) -> String {
    format!(
        "{}/releases/download/v{}/{}",
        repo_url(base_url, owner, repo),
        version,
        binary_name
    )
}

/// Release listing page, shown as the manual installation fallback.
pub fn releases_url(base_url: &str, owner: &str, repo: &str) -> String {
    format!("{}/releases", repo_url(base_url, owner, repo))
}

fn repo_url(base_url: &str, owner: &str, repo: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), owner, repo)
}

/// Where one release binary comes from and where it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    pub binary_name: String,
    pub url: String,
    pub dist_dir: PathBuf,
    pub destination: PathBuf,
}

impl DownloadTarget {
    pub fn new(
        tag: &PlatformTag,
        base_url: &str,
        owner: &str,
        repo: &str,
        version: &str,
        package_dir: &Path,
    ) -> Self {
        let binary_name = binary_name(tag);
        let url = download_url(base_url, owner, repo, version, &binary_name);
        let dist_dir = package_dir.join(DIST_DIR);
        let file_name = if tag.is_windows() {
            format!("{}.exe", BINARY_STEM)
        } else {
            BINARY_STEM.to_string()
        };
        let destination = dist_dir.join(file_name);

        Self {
            binary_name,
            url,
            dist_dir,
            destination,
        }
    }
}

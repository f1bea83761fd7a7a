use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::{
    download::fetch,
    platform::{HostPlatform, PlatformDetector},
    runtime::Runtime,
};

pub mod config;
mod manifest;
mod target;

pub use config::{Config, InstallOptions};
pub use manifest::{Manifest, read_version};
pub use target::{DownloadTarget, binary_name, download_url, releases_url};

/// Permission bits for the installed binary on non-Windows targets.
const EXECUTABLE_MODE: u32 = 0o755;

/// Result of an installer run. Both variants end the process successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    Failed,
}

/// Runs the installer and reports the outcome without ever failing.
///
/// Errors are printed together with the manual installation URL so that a
/// parent `npm install` keeps going when the binary cannot be fetched.
#[tracing::instrument(skip_all)]
pub async fn install<R: Runtime, D: PlatformDetector>(
    runtime: &R,
    detector: &D,
    options: InstallOptions,
) -> InstallOutcome {
    let fallback = releases_url(&options.base_url, &options.owner, &options.repo);

    let result = match Config::new(options) {
        Ok(config) => run(runtime, detector, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(path) => InstallOutcome::Installed(path),
        Err(e) => {
            eprintln!("Installation failed: {:#}", e);
            eprintln!("Please install manually from: {}", fallback);
            InstallOutcome::Failed
        }
    }
}

/// Resolves, downloads and marks the binary executable.
/// Returns the path of the installed binary.
#[tracing::instrument(skip_all)]
pub async fn run<R: Runtime, D: PlatformDetector>(
    runtime: &R,
    detector: &D,
    config: &Config,
) -> Result<PathBuf> {
    let options = &config.options;
    println!("Installing {}...", target::BINARY_STEM);

    let version = read_version(runtime, &options.package_dir, options.version.as_deref())?;
    debug!("Release version: {}", version);

    let host = host_platform(detector, options);
    let tag = host.resolve()?;
    println!("Detected platform: {}", tag);

    let target = DownloadTarget::new(
        &tag,
        &options.base_url,
        &options.owner,
        &options.repo,
        &version,
        &options.package_dir,
    );
    println!("Downloading from: {}", target.url);

    if !runtime.exists(&target.dist_dir) {
        debug!("Creating {:?}", target.dist_dir);
        runtime
            .create_dir_all(&target.dist_dir)
            .with_context(|| format!("Failed to create directory {:?}", target.dist_dir))?;
    }

    fetch(runtime, &config.client, &target.url, &target.destination).await?;

    if !tag.is_windows() {
        runtime
            .set_permissions(&target.destination, EXECUTABLE_MODE)
            .with_context(|| format!("Failed to make {:?} executable", target.destination))?;
    }

    info!("Installed {} to {:?}", target.binary_name, target.destination);
    println!("Installation complete!");

    Ok(target.destination)
}

/// Detected host platform with any explicit overrides applied.
fn host_platform<D: PlatformDetector>(detector: &D, options: &InstallOptions) -> HostPlatform {
    match (&options.os, &options.arch) {
        (Some(os), Some(arch)) => HostPlatform::new(os.as_str(), arch.as_str()),
        (os, arch) => {
            let detected = detector.detect();
            HostPlatform {
                os: os.clone().unwrap_or(detected.os),
                arch: arch.clone().unwrap_or(detected.arch),
            }
        }
    }
}

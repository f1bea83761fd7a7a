use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::runtime::Runtime;

pub const MANIFEST_FILE: &str = "package.json";

/// The part of `package.json` the installer cares about.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub version: String,
}

impl Manifest {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let content = runtime
            .read_to_string(&path)
            .with_context(|| format!("Failed to read package manifest at {:?}", path))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package manifest at {:?}", path))?;

        if manifest.version.trim().is_empty() {
            anyhow::bail!("Package manifest at {:?} has an empty version", path);
        }
        Ok(manifest)
    }
}

/// Release version: the explicit override, else the manifest's `version`.
pub fn read_version<R: Runtime>(
    runtime: &R,
    package_dir: &Path,
    version_override: Option<&str>,
) -> Result<String> {
    let version = match version_override {
        Some(v) => v.trim().to_string(),
        None => Manifest::load(runtime, package_dir)?.version.trim().to_string(),
    };
    Ok(normalize_version(&version).to_string())
}

/// Drops a single leading `v`; the download URL adds its own.
fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

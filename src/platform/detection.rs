use super::resolver::{PlatformError, PlatformTag, resolve};

/// Host platform as reported by the running system.
///
/// Tags use the release naming vocabulary (`darwin`, `linux`, `win32`;
/// `x64`, `arm64`), not Rust's own target names.
#[derive(Debug, Clone, PartialEq)]
pub struct HostPlatform {
    pub os: String,
    pub arch: String,
}

impl HostPlatform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self {
            os: os_tag(std::env::consts::OS).to_string(),
            arch: arch_tag(std::env::consts::ARCH).to_string(),
        }
    }

    /// Resolve this descriptor to a canonical platform tag.
    pub fn resolve(&self) -> Result<PlatformTag, PlatformError> {
        resolve(&self.os, &self.arch)
    }
}

/// Translate a Rust OS name into the release vocabulary.
/// Unknown names pass through and are rejected later by [`resolve`].
fn os_tag(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

fn arch_tag(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

/// Trait for platform detection (useful for testing)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> HostPlatform;
}

/// Default platform detector using compile-time detection
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> HostPlatform {
        HostPlatform::detect()
    }
}

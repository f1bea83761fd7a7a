//! Platform detection and resolution module
//!
//! This module detects the host platform (OS and architecture) and resolves
//! it to the canonical `{os}-{arch}` tag used to name release binaries.

mod detection;
mod resolver;

pub use detection::{DefaultPlatformDetector, HostPlatform, PlatformDetector};
#[cfg(test)]
pub use detection::MockPlatformDetector;
pub use resolver::{PlatformError, PlatformTag, TargetArch, TargetOs, resolve};

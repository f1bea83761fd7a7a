use std::fmt;

/// Operating systems that have a published release binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Darwin,
    Linux,
    Windows,
}

impl TargetOs {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "darwin" => Some(Self::Darwin),
            "linux" => Some(Self::Linux),
            "win32" => Some(Self::Windows),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }
}

/// CPU architectures that have a published release binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArch {
    X64,
    Arm64,
}

impl TargetArch {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "x64" => Some(Self::X64),
            "arm64" => Some(Self::Arm64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }
}

/// Canonical platform tag, rendered as `{os}-{arch}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTag {
    pub os: TargetOs,
    pub arch: TargetArch,
}

impl PlatformTag {
    pub fn is_windows(&self) -> bool {
        self.os == TargetOs::Windows
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

/// Reasons a host platform cannot be mapped to a release binary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The OS or architecture tag has no mapping.
    UnsupportedPlatform { os: String, arch: String },
    /// Both tags map, but the pair has no release.
    UnsupportedCombination { os: String, arch: String },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::UnsupportedPlatform { os, arch } => {
                write!(f, "Unsupported platform: {}-{}", os, arch)
            }
            PlatformError::UnsupportedCombination { os, arch } => {
                write!(f, "Unsupported platform combination: {}-{}", os, arch)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

/// Pairs that map individually but have no release binary.
const DENIED: &[(TargetOs, TargetArch)] = &[(TargetOs::Windows, TargetArch::Arm64)];

/// Resolve an OS tag and an architecture tag to a canonical platform tag.
///
/// Lookups are exact: `darwin`, `linux`, `win32` for the OS and `x64`,
/// `arm64` for the architecture. Unknown tags are reported before the
/// deny-list is consulted.
pub fn resolve(os: &str, arch: &str) -> Result<PlatformTag, PlatformError> {
    let (Some(target_os), Some(target_arch)) = (TargetOs::from_tag(os), TargetArch::from_tag(arch))
    else {
        return Err(PlatformError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        });
    };

    if DENIED.contains(&(target_os, target_arch)) {
        return Err(PlatformError::UnsupportedCombination {
            os: os.to_string(),
            arch: arch.to_string(),
        });
    }

    Ok(PlatformTag {
        os: target_os,
        arch: target_arch,
    })
}

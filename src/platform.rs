//! Operating system and CPU architecture tokens for layout templates.
use std::fmt;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux.
    Linux,
    /// macOS.
    Darwin,
    /// Windows.
    Windows,
    /// Anything else; rendered with the compiler's OS name.
    Other(&'static str),
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Detected CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// `x86_64`.
    Amd64,
    /// `aarch64`.
    Arm64,
    /// 32-bit `x86`.
    X86,
    /// Anything else; rendered with the compiler's architecture name.
    Other(&'static str),
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amd64 => write!(f, "amd64"),
            Self::Arm64 => write!(f, "arm64"),
            Self::X86 => write!(f, "386"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Platform information for the current system.
///
/// Tokens follow the conventional distribution naming (`linux-amd64`,
/// `darwin-arm64`, `windows-386`) used for per-platform binary directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::parse_os(std::env::consts::OS),
            arch: Self::parse_arch(std::env::consts::ARCH),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// `<os>-<arch>` token, e.g. `linux-amd64`.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    fn parse_os(name: &'static str) -> Os {
        match name {
            "linux" => Os::Linux,
            "macos" => Os::Darwin,
            "windows" => Os::Windows,
            other => Os::Other(other),
        }
    }

    fn parse_arch(name: &'static str) -> Arch {
        match name {
            "x86_64" => Arch::Amd64,
            "aarch64" => Arch::Arm64,
            "x86" => Arch::X86,
            other => Arch::Other(other),
        }
    }
}

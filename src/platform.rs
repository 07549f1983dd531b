//! Platform detection and target key resolution.
//!
//! The host's operating system and architecture are normalized to the vocabulary used by
//! release assets (`darwin`/`linux`/`win32`, `x64`/`arm64`) and checked against the single
//! list of supported targets in [`TargetKey::ALL`].

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A supported `{os}-{arch}` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKey {
    DarwinX64,
    DarwinArm64,
    LinuxX64,
    LinuxArm64,
    Win32X64,
}

impl TargetKey {
    pub const ALL: [TargetKey; 5] = [
        TargetKey::DarwinX64,
        TargetKey::DarwinArm64,
        TargetKey::LinuxX64,
        TargetKey::LinuxArm64,
        TargetKey::Win32X64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKey::DarwinX64 => "darwin-x64",
            TargetKey::DarwinArm64 => "darwin-arm64",
            TargetKey::LinuxX64 => "linux-x64",
            TargetKey::LinuxArm64 => "linux-arm64",
            TargetKey::Win32X64 => "win32-x64",
        }
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnsupportedPlatform { key: s.to_string() })
    }
}

/// Platform information as reported by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> Self {
        Self::from_host(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Normalize Rust's OS/arch identifiers. Unknown values are kept as-is so they show up
    /// verbatim in the unsupported-platform message.
    pub fn from_host(os: &str, arch: &str) -> Self {
        let os = match os {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        };
        let arch = match arch {
            "x86_64" => "x64",
            "aarch64" => "arm64",
            other => other,
        };
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
        }
    }

    /// The raw `{os}-{arch}` key, supported or not.
    pub fn key(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    /// Resolve this platform to a supported target.
    #[tracing::instrument]
    pub fn target_key(&self) -> anyhow::Result<TargetKey> {
        let key = self.key();
        let target = key.parse::<TargetKey>()?;
        log::debug!("Resolved platform {} to target {}", key, target);
        Ok(target)
    }
}

/// Resolve the host platform. No side effects, no network.
pub fn resolve() -> anyhow::Result<TargetKey> {
    Platform::detect().target_key()
}

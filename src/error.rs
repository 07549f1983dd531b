//! Terminal failures of the installer and the launcher.
//!
//! Every variant ends the current process with a non-zero exit code. They travel inside
//! `anyhow::Error` and can be recovered with `downcast_ref::<Error>()`.

use std::path::PathBuf;
use std::time::Duration;

use crate::platform::TargetKey;

/// Where to ask for a platform that is not released yet.
pub const ISSUES_URL: &str = "https://github.com/gitvault-tech/gitvault/issues";

#[derive(Debug)]
pub enum Error {
    /// The host (or a requested key) is not in the supported set.
    UnsupportedPlatform { key: String },
    /// The release server answered with a non-2xx status, or the request never completed.
    DownloadFailed { url: String, reason: String },
    /// The download did not finish within the overall request bound.
    Timeout { url: String, after: Duration },
    /// Creating, writing or committing the artifact file failed.
    WriteFailed { path: PathBuf, reason: String },
    /// The executable bits could not be set.
    PermissionFailed { path: PathBuf, reason: String },
    /// The downloaded file is present but does not run.
    VerificationFailed { path: PathBuf, reason: String },
    /// The launcher found no executable at the artifact path.
    NotInstalled { path: PathBuf },
    /// The launcher could not start the executable.
    SpawnFailed { path: PathBuf, reason: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedPlatform { key } => {
                let supported: Vec<&str> = TargetKey::ALL.iter().map(|k| k.as_str()).collect();
                write!(
                    f,
                    "Unsupported platform: {}. Supported platforms: {}. \
                     If you believe this platform should be supported, please open an issue at: {}",
                    key,
                    supported.join(", "),
                    ISSUES_URL
                )
            }
            Error::DownloadFailed { url, reason } => {
                write!(f, "Failed to download binary from {}: {}", url, reason)
            }
            Error::Timeout { url, after } => {
                write!(
                    f,
                    "Download timed out after {}s: {}. Please check your internet connection.",
                    after.as_secs_f64(),
                    url
                )
            }
            Error::WriteFailed { path, reason } => {
                write!(f, "Failed to write binary file {}: {}", path.display(), reason)
            }
            Error::PermissionFailed { path, reason } => {
                write!(
                    f,
                    "Failed to set executable permissions on {}: {}",
                    path.display(),
                    reason
                )
            }
            Error::VerificationFailed { path, reason } => {
                write!(
                    f,
                    "Downloaded binary {} is not working properly ({}). \
                     This might be due to architecture mismatch or corrupted download.",
                    path.display(),
                    reason
                )
            }
            Error::NotInstalled { path } => {
                write!(
                    f,
                    "Phantom binary not found at {}. Please run: phantom-install install",
                    path.display()
                )
            }
            Error::SpawnFailed { path, reason } => {
                write!(f, "Failed to start phantom at {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Returns the taxonomy entry carried by an `anyhow::Error`, if any.
pub fn classify(err: &anyhow::Error) -> Option<&Error> {
    err.chain().find_map(|cause| cause.downcast_ref::<Error>())
}

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Environment variable both binaries read the package root from.
pub const ROOT_ENV: &str = "PHANTOM_ROOT";

const EXECUTABLE_STEM: &str = "phantom";

/// Get the package root, falling back to the default one
#[tracing::instrument(skip(runtime))]
pub fn package_root<R: Runtime>(runtime: &R, root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => path,
        None => default_package_root(runtime)?,
    };

    info!("Using package root: {}", root.display());
    Ok(root)
}

/// Get the default package root (`~/.phantom`)
#[tracing::instrument(skip(runtime))]
pub fn default_package_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home_dir = runtime
        .home_dir()
        .context("Could not find home directory")?;
    Ok(home_dir.join(".phantom"))
}

/// `<root>/bin/phantom`, the only path the launcher executes.
pub fn executable_path(root: &Path) -> PathBuf {
    root.join("bin")
        .join(format!("{}{}", EXECUTABLE_STEM, std::env::consts::EXE_SUFFIX))
}

/// Sibling of [`executable_path`] the acquirer writes and verifies before committing.
pub fn staging_path(root: &Path) -> PathBuf {
    root.join("bin").join(format!(
        "{}.partial{}",
        EXECUTABLE_STEM,
        std::env::consts::EXE_SUFFIX
    ))
}

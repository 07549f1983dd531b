//! Transparent relay to the installed executable.

use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::paths::{ROOT_ENV, executable_path, package_root};
use crate::runtime::Runtime;

/// Exit code when the launcher itself fails (not installed, cannot spawn).
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Run the installed executable with `args` and return its exit code.
///
/// The package root comes from `PHANTOM_ROOT`, falling back to `~/.phantom`.
#[tracing::instrument(skip(runtime, args))]
pub fn launch<R: Runtime>(runtime: &R, args: &[OsString]) -> Result<i32> {
    let root = runtime
        .env_var(ROOT_ENV)
        .ok()
        .filter(|root| !root.is_empty())
        .map(PathBuf::from);
    let root = package_root(runtime, root)?;
    run(runtime, &root, args)
}

/// Run `<root>/bin/phantom` with `args`, stdio and working directory inherited.
#[tracing::instrument(skip(runtime, args))]
pub fn run<R: Runtime>(runtime: &R, root: &Path, args: &[OsString]) -> Result<i32> {
    let executable = executable_path(root);
    if !runtime.is_file(&executable) {
        return Err(Error::NotInstalled { path: executable }.into());
    }

    debug!(
        "Relaying {} argument(s) to {}",
        args.len(),
        executable.display()
    );
    let code = runtime
        .run_inherited(&executable, args)
        .map_err(|e| Error::SpawnFailed {
            path: executable.clone(),
            reason: format!("{:#}", e),
        })?;
    debug!("{} exited with {}", executable.display(), code);
    Ok(code)
}

//! Child process operations.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use super::{ProbeOutcome, RealRuntime};

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) async fn probe_impl(
        &self,
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", program.display()))?;

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => {
                let status = status.context("Failed to wait for process")?;
                Ok(ProbeOutcome::Exited(status.code()))
            }
            Err(_) => {
                debug!("{} still running after {:?}, killing it", program.display(), timeout);
                if let Err(e) = child.kill().await {
                    debug!("Failed to kill {}: {}", program.display(), e);
                }
                Ok(ProbeOutcome::TimedOut)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_inherited_impl(&self, program: &Path, args: &[OsString]) -> Result<i32> {
        // Command inherits stdio and the working directory unless told otherwise.
        let status = std::process::Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to spawn {}", program.display()))?;
        Ok(exit_code(status))
    }
}

/// Exit code to report for a finished child.
/// Signal deaths map to `128 + signal` like a shell would, anything else without a code to 1.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

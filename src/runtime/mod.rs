//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables and directories
//! - `fs` - File system operations (create, rename, remove, permissions)
//! - `process` - Child processes (bounded probe, inherited-stdio relay)

mod env;
mod fs;
mod process;

use anyhow::Result;
use async_trait::async_trait;
use std::env as std_env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a bounded probe process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The process exited on its own. `None` means it had no exit code (killed by a signal).
    Exited(Option<i32>),
    /// The process outlived its bound and was killed.
    TimedOut,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn home_dir(&self) -> Option<PathBuf>;

    // File System
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes

    /// Run `program` with stdio detached from ours and wait at most `timeout` for it.
    /// A process that is still running at the deadline is killed.
    /// Errors only when the process cannot be started.
    async fn probe(&self, program: &Path, args: &[String], timeout: Duration)
    -> Result<ProbeOutcome>;

    /// Run `program` with our stdin/stdout/stderr and working directory, wait for it,
    /// and return the exit code to report for it.
    fn run_inherited(&self, program: &Path, args: &[OsString]) -> Result<i32>;
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    async fn probe(
        &self,
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        self.probe_impl(program, args, timeout).await
    }

    fn run_inherited(&self, program: &Path, args: &[OsString]) -> Result<i32> {
        self.run_inherited_impl(program, args)
    }
}

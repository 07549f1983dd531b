//! Binary acquisition: target → release URL → staged download → executable → verified → committed.

use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    cleanup::{self, CleanupGuard, SharedCleanupContext},
    error::Error,
    http::HttpClient,
    paths::{executable_path, staging_path},
    platform::{self, TargetKey},
    runtime::Runtime,
};

pub mod asset;
pub mod config;
mod verify;

pub use asset::{asset_name, release_url};
pub use config::{Config, Options};
pub use verify::{VERSION_QUERY_ARG, verify};

/// Permission bits of the installed executable.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// A verified executable committed at its final path.
#[derive(Debug, Clone, PartialEq)]
pub struct Installed {
    pub target: TargetKey,
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Resolve the host platform and install the matching binary.
#[tracing::instrument(skip(runtime))]
pub async fn install<R: Runtime>(runtime: R, options: Options) -> Result<Installed> {
    let target = platform::resolve()?;
    let config = Config::new(runtime, options)?;
    let acquirer = Acquirer::new(config);

    // Set up cleanup context for Ctrl-C handling
    let cleanup_ctx = cleanup::new_shared();
    let cleanup_ctx_clone = Arc::clone(&cleanup_ctx);

    let ctrl_c_handler = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, cleaning up...");
            if let Ok(ctx) = cleanup_ctx_clone.lock() {
                ctx.cleanup();
            }
            std::process::exit(130); // Standard exit code for Ctrl-C
        }
    });

    let result = acquirer.acquire(target, cleanup_ctx).await;

    // Abort the Ctrl-C handler since acquisition completed (successfully or with error)
    ctrl_c_handler.abort();

    let installed = result?;
    println!("   installed {} {}", installed.target, installed.path.display());
    Ok(installed)
}

pub struct Acquirer<R: Runtime> {
    runtime: R,
    http: HttpClient,
    release: String,
    base_url: String,
    verify_timeout: Duration,
    root: PathBuf,
}

impl<R: Runtime> Acquirer<R> {
    pub fn new(config: Config<R>) -> Self {
        Self {
            runtime: config.runtime,
            http: config.http,
            release: config.release,
            base_url: config.base_url,
            verify_timeout: config.verify_timeout,
            root: config.root,
        }
    }

    /// Where the verified executable ends up.
    pub fn executable_path(&self) -> PathBuf {
        executable_path(&self.root)
    }

    /// Runs every stage in order. The first failure ends the run, removes the staging file
    /// and leaves any previously committed executable untouched.
    #[tracing::instrument(skip(self, cleanup_ctx))]
    pub async fn acquire(
        &self,
        target: TargetKey,
        cleanup_ctx: SharedCleanupContext,
    ) -> Result<Installed> {
        println!("   resolving {} v{}", target, self.release);
        let asset = asset_name(target)?;
        let url = release_url(&self.base_url, &self.release, asset);
        let dest = self.executable_path();
        let staging = staging_path(&self.root);

        self.prepare_destination(&dest)?;

        let guard = CleanupGuard::new(cleanup_ctx, staging.clone());
        match self.stage_and_commit(&url, &staging, &dest).await {
            Ok(bytes) => {
                guard.success();
                Ok(Installed {
                    target,
                    url,
                    path: dest,
                    bytes,
                })
            }
            Err(e) => {
                self.discard(&staging);
                Err(e)
            }
        }
    }

    async fn stage_and_commit(&self, url: &str, staging: &Path, dest: &Path) -> Result<u64> {
        println!("  downloading {}", url);
        let bytes = self.download(url, staging).await?;
        info!("Downloaded {} bytes to {:?}", bytes, staging);

        self.make_executable(staging)?;

        println!("   verifying {}", staging.display());
        verify(&self.runtime, staging, self.verify_timeout).await?;

        self.commit(staging, dest)?;
        Ok(bytes)
    }

    #[tracing::instrument(skip(self))]
    fn prepare_destination(&self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            self.runtime
                .create_dir_all(parent)
                .map_err(|e| Error::WriteFailed {
                    path: parent.to_path_buf(),
                    reason: format!("{:#}", e),
                })?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn download(&self, url: &str, staging: &Path) -> Result<u64> {
        self.http
            .download_file(url, staging, || {
                self.runtime.create_file(staging).map_err(|e| {
                    anyhow::Error::from(Error::WriteFailed {
                        path: staging.to_path_buf(),
                        reason: format!("{:#}", e),
                    })
                })
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    fn make_executable(&self, path: &Path) -> Result<()> {
        self.runtime
            .set_permissions(path, EXECUTABLE_MODE)
            .map_err(|e| Error::PermissionFailed {
                path: path.to_path_buf(),
                reason: format!("{:#}", e),
            })?;
        Ok(())
    }

    /// Moves the verified file over the previous executable in one rename.
    #[tracing::instrument(skip(self))]
    fn commit(&self, staging: &Path, dest: &Path) -> Result<()> {
        self.runtime
            .rename(staging, dest)
            .map_err(|e| Error::WriteFailed {
                path: dest.to_path_buf(),
                reason: format!("{:#}", e),
            })?;
        debug!("Committed {:?} to {:?}", staging, dest);
        Ok(())
    }

    fn discard(&self, staging: &Path) {
        if !self.runtime.exists(staging) {
            return;
        }
        if let Err(e) = self.runtime.remove_file(staging) {
            warn!("Failed to remove partial download {:?}: {}", staging, e);
        }
    }
}

//! HTTP client that streams one download under an overall deadline.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use super::status::{describe_status, error_chain};
use crate::error::Error;

/// HTTP client for release downloads. Each download is a single attempt bounded by `timeout`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Downloads `url` into the writer returned by `create_writer` and returns the byte count.
    ///
    /// The writer is only created once the server has answered with a 2xx status, so a failed
    /// request leaves nothing behind. `dest` is only used to report write failures.
    /// Exceeding the deadline drops the in-flight transfer and fails with [`Error::Timeout`].
    #[tracing::instrument(skip(self, dest, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, dest: &Path, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {} (timeout {:?})...", url, self.timeout);

        match tokio::time::timeout(self.timeout, self.download_file_once(url, dest, create_writer))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }
            .into()),
        }
    }

    async fn download_file_once<W, F>(&self, url: &str, dest: &Path, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                reason: describe_status(status),
            }
            .into());
        }

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.request_error(url, e))?
        {
            writer
                .write_all(&chunk)
                .map_err(|e| write_error(dest, e))?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().map_err(|e| write_error(dest, e))?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }

    fn request_error(&self, url: &str, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            return Error::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }
            .into();
        }
        Error::DownloadFailed {
            url: url.to_string(),
            reason: error_chain(&error),
        }
        .into()
    }
}

fn write_error(dest: &Path, error: std::io::Error) -> anyhow::Error {
    Error::WriteFailed {
        path: dest.to_path_buf(),
        reason: error.to_string(),
    }
    .into()
}

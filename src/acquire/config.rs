use anyhow::{Result, bail};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::path::PathBuf;
use std::time::Duration;

use crate::http::HttpClient;
use crate::paths::package_root;
use crate::runtime::Runtime;

/// Release fetched when none is requested, injected by the build script.
pub const DEFAULT_RELEASE: &str = env!("PHANTOM_DEFAULT_RELEASE");

pub const DEFAULT_BASE_URL: &str = "https://github.com/gitvault-tech/gitvault/releases/download";

pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Installer settings as given by the operator. `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub root: Option<PathBuf>,
    pub release: Option<String>,
    pub base_url: Option<String>,
    pub download_timeout: Option<Duration>,
    pub verify_timeout: Option<Duration>,
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub http: HttpClient,
    pub release: String,
    pub base_url: String,
    pub verify_timeout: Duration,
    pub root: PathBuf,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, options: Options) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
        }

        let client = Client::builder()
            .user_agent(concat!("phantom-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let http = HttpClient::new(
            client,
            options.download_timeout.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT),
        );

        let release = normalize_release(options.release.as_deref().unwrap_or(DEFAULT_RELEASE))?;
        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let root = package_root(&runtime, options.root)?;

        Ok(Self {
            runtime,
            http,
            release,
            base_url,
            verify_timeout: options.verify_timeout.unwrap_or(DEFAULT_VERIFY_TIMEOUT),
            root,
        })
    }
}

/// Accepts `1.2.3` or `v1.2.3` and returns `1.2.3`.
pub fn normalize_release(release: &str) -> Result<String> {
    let release = release.trim();
    let release = release.strip_prefix('v').unwrap_or(release);
    if release.is_empty() {
        bail!("Release version must not be empty");
    }
    Ok(release.to_string())
}

fn mask_token(token: &str) -> String {
    match (token.get(..4), token.get(token.len().saturating_sub(4)..)) {
        (Some(head), Some(tail)) if token.len() > 12 => format!("{}*********{}", head, tail),
        _ => "*********".to_string(),
    }
}

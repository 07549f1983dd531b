use anyhow::Result;
use clap::Parser;
use phantom_cli::acquire::{Options, install};
use phantom_cli::platform;
use std::path::PathBuf;
use std::time::Duration;

/// phantom-install - Phantom CLI installer
///
/// Download the phantom binary for this platform from its GitHub release,
/// make it executable and check that it runs.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
///
/// Examples:
///   phantom-install check                   # Is this platform supported?
///   phantom-install install                 # Install the default release
///   phantom-install install --release 1.2.0 # Install a specific release
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package root directory (default: ~/.phantom)
    #[arg(
        long = "root",
        short = 'r',
        env = "PHANTOM_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,

    /// Release to install (default: the release this installer was built for)
    #[arg(long = "release", env = "PHANTOM_RELEASE", value_name = "VERSION", global = true)]
    pub release: Option<String>,

    /// Base URL release assets are downloaded from
    #[arg(
        long = "base-url",
        env = "PHANTOM_RELEASE_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,

    /// Give up on the download after this many seconds
    #[arg(
        long = "download-timeout",
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub download_timeout: u64,

    /// Give up on `phantom --version` after this many seconds
    #[arg(
        long = "verify-timeout",
        value_name = "SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub verify_timeout: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download, verify and install the phantom binary
    Install,

    /// Check that this platform has a phantom release
    Check,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            root: self.root.clone(),
            release: self.release.clone(),
            base_url: self.base_url.clone(),
            download_timeout: Some(Duration::from_secs(self.download_timeout)),
            verify_timeout: Some(Duration::from_secs(self.verify_timeout)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = phantom_cli::runtime::RealRuntime;

    match cli.command {
        Commands::Install => {
            install(runtime, cli.options()).await?;
        }
        Commands::Check => {
            let target = platform::resolve()?;
            println!("   supported {}", target);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_install_parsing() {
        let cli = Cli::try_parse_from(["phantom-install", "install"]).unwrap();
        assert!(matches!(cli.command, Commands::Install));
        assert_eq!(cli.download_timeout, 30);
        assert_eq!(cli.verify_timeout, 5);
    }

    #[test]
    fn test_cli_check_parsing() {
        let cli = Cli::try_parse_from(["phantom-install", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_cli_global_options_parsing() {
        let cli = Cli::try_parse_from([
            "phantom-install",
            "--root",
            "/tmp/phantom",
            "install",
            "--release",
            "v1.2.0",
            "--base-url",
            "http://127.0.0.1:8080",
            "--download-timeout",
            "2",
            "--verify-timeout",
            "1",
        ])
        .unwrap();

        let options = cli.options();
        assert_eq!(options.root, Some(PathBuf::from("/tmp/phantom")));
        assert_eq!(options.release.as_deref(), Some("v1.2.0"));
        assert_eq!(options.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(options.download_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.verify_timeout, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_cli_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["phantom-install", "install", "--download-timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["phantom-install"]);
        assert!(result.is_err());
    }
}

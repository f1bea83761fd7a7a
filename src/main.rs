use anyhow::Result;
use clap::Parser;
use cordsync_install::install::{InstallOptions, config, install, releases_url};
use cordsync_install::platform::DefaultPlatformDetector;
use cordsync_install::{http, runtime::RealRuntime};
use std::path::PathBuf;
use std::time::Duration;

/// cordsync-install - fetch the prebuilt cordsync binary
///
/// Resolves the host platform, downloads the matching release binary into
/// `<package dir>/dist` and marks it executable.
///
/// A failed download is reported on stderr together with the manual
/// installation URL, but the exit status stays 0 so that the surrounding
/// package installation is not interrupted.
#[derive(Parser, Debug)]
#[command(author, about, version = env!("CORDSYNC_INSTALL_VERSION"))]
struct Cli {
    /// Package directory holding package.json (defaults to the current directory)
    #[arg(long, env = "CORDSYNC_PACKAGE_DIR", value_name = "PATH")]
    package_dir: Option<PathBuf>,

    /// Release version to install instead of the one in package.json
    #[arg(long, env = "CORDSYNC_VERSION", value_name = "VERSION")]
    release_version: Option<String>,

    /// Repository owner hosting the releases
    #[arg(long, default_value = config::DEFAULT_OWNER)]
    owner: String,

    /// Repository name hosting the releases
    #[arg(long, default_value = config::DEFAULT_REPO)]
    repo: String,

    /// Base URL of the release host
    #[arg(long, env = "CORDSYNC_BASE_URL", default_value = config::DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// Override the detected OS tag (darwin, linux, win32)
    #[arg(long, value_name = "TAG")]
    os: Option<String>,

    /// Override the detected architecture tag (x64, arm64)
    #[arg(long, value_name = "TAG")]
    arch: Option<String>,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = http::DEFAULT_MAX_REDIRECTS)]
    max_redirects: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = http::DEFAULT_TIMEOUT_SECS, value_name = "SECS")]
    timeout: u64,
}

impl Cli {
    /// Manual installation page for the configured repository.
    fn fallback_url(&self) -> String {
        releases_url(&self.base_url, &self.owner, &self.repo)
    }

    fn into_options(self) -> Result<InstallOptions> {
        let package_dir = match self.package_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        Ok(InstallOptions {
            version: self.release_version,
            owner: self.owner,
            repo: self.repo,
            base_url: self.base_url,
            os: self.os,
            arch: self.arch,
            max_redirects: self.max_redirects,
            timeout: Duration::from_secs(self.timeout),
            ..InstallOptions::new(package_dir)
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let fallback = cli.fallback_url();

    match cli.into_options() {
        Ok(options) => {
            install(&RealRuntime, &DefaultPlatformDetector, options).await;
        }
        Err(e) => {
            eprintln!("Installation failed: {:#}", e);
            eprintln!("Please install manually from: {}", fallback);
        }
    }

    // Failures are reported above; the exit status stays successful
    Ok(())
}

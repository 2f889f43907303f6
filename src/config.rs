/*!
 * Configuration handling for gopherdex
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::report::ReportFormat;

/// Origin server crawled when no hostname argument is given
pub const DEFAULT_HOST: &str = "comp3310.ddns.net";

/// Standard Gopher port
pub const DEFAULT_PORT: u16 = 70;

/// Directory downloads land under when `--download-dir` is not given
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloaded_files";

/// Command-line arguments for gopherdex
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "gopherdex",
    version = env!("CARGO_PKG_VERSION"),
    about = "Recursively crawl and index a Gopher server",
    long_about = "Walks a Gopher server's menu tree depth-first, downloads every \
                  referenced text and binary resource, probes external server \
                  references, and prints statistics over the traversal."
)]
pub struct Args {
    /// Hostname of the origin Gopher server
    #[clap(default_value = DEFAULT_HOST)]
    pub hostname: String,

    /// Port of the origin Gopher server
    #[clap(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum recursion depth; the root menu is depth 0. Unbounded when
    /// omitted.
    #[clap(value_name = "MAX_DEPTH")]
    pub max_depth: Option<u32>,

    /// Directory downloaded resources are stored under
    #[clap(long, default_value = DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,

    /// Report output format
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report_format: ReportFormat,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Origin host; only entries matching this exact string are descended
    pub host: String,

    /// Origin port
    pub port: u16,

    /// Recursion depth cap (root is depth 0)
    pub max_depth: u32,

    /// Download root for fetched resources
    pub download_dir: PathBuf,

    /// Report output format
    pub report_format: ReportFormat,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            host: args.hostname,
            port: args.port,
            max_depth: args.max_depth.unwrap_or(u32::MAX),
            download_dir: args.download_dir,
            report_format: args.report_format,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // The download root itself is created on demand by the writer.
        if self.download_dir.exists() && !self.download_dir.is_dir() {
            crate::bail!(
                InvalidArgument,
                "download directory {} exists and is not a directory",
                self.download_dir.display()
            );
        }
        Ok(())
    }
}

//! Command-line interface for wxport.
//!
//! # Commands
//!
//! - `convert` - Resolve pages and write their artifacts to the output root
//! - `inspect` - Resolve one page and print the run report as JSON
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only report errors
//! - `--config` - Use a specific `wxport.toml`
//!
//! # Examples
//!
//! ```bash
//! wxport convert src/pages/index/index.wxml
//! wxport convert --all --output build --wxml-ext .swan
//! wxport --verbose inspect src/pages/index/index.wxml
//! ```
//!
//! # Configuration
//!
//! Options come from `--config`, else from `wxport.toml` in the current
//! directory when present, else from the built-in defaults. Command flags
//! override whatever was loaded.

pub mod convert;
pub mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::ConvertOptions;
use crate::constants::CONFIG_FILE_NAME;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,

    /// Suppress summaries on stdout.
    pub quiet: bool,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over [`log_level`](Self::log_level). Output
    /// goes to stderr so `inspect` can keep stdout for JSON.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Conversion options for this invocation, before command overrides.
    pub fn load_options(&self) -> Result<ConvertOptions> {
        let cwd = std::env::current_dir()?;
        load_options(self.config_path.as_deref(), &cwd)
    }
}

/// Options from `config` when given, else from `<cwd>/wxport.toml` when it
/// exists, else the defaults rooted at `cwd`.
pub fn load_options(config: Option<&Path>, cwd: &Path) -> Result<ConvertOptions> {
    if let Some(path) = config {
        return ConvertOptions::load(&cwd.join(path));
    }

    let default_path = cwd.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        return ConvertOptions::load(&default_path);
    }

    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    Ok(ConvertOptions::default().with_base_dir(cwd))
}

/// Convert WXML page templates into standalone importable modules.
#[derive(Parser)]
#[command(
    name = "wxport",
    about = "Split WXML pages into standalone template and view modules",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output, including every page loaded and written.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file (defaults to ./wxport.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve pages and write their artifacts.
    ///
    /// See [`convert::ConvertCommand`].
    Convert(convert::ConvertCommand),

    /// Resolve a page and print the run report as JSON.
    ///
    /// See [`inspect::InspectCommand`].
    Inspect(inspect::InspectCommand),
}

impl Cli {
    /// Run the selected command with logging set up from the global flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
            quiet: self.quiet,
        }
    }

    /// Run the selected command without touching the global subscriber.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        match self.command {
            Commands::Convert(cmd) => cmd.execute(config),
            Commands::Inspect(cmd) => cmd.execute(config),
        }
    }
}

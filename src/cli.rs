//! Command line surface of the `css-bundler` binary.

use std::path::PathBuf;

use clap::Parser;
use css_bundler::config::DEFAULT_TASK;

/// Concatenate and minify ordered CSS sources into a single bundle.
#[derive(Parser, Debug)]
#[command(name = "css-bundler", version, about)]
pub struct Cli {
  /// Task to run. `default` runs every configured task.
  #[arg(value_name = "TASK", default_value = DEFAULT_TASK)]
  pub task: String,

  /// Project root that source patterns and output directories are relative to.
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub root: PathBuf,

  /// Configuration file to use instead of `<root>/bundle.config.json`.
  #[arg(long = "config", value_name = "PATH")]
  pub config_path: Option<PathBuf>,

  /// Log filter directive; overrides `RUST_LOG` (defaults to `info`).
  #[arg(long = "log-level", value_name = "LEVEL")]
  pub log_level: Option<String>,

  /// Print the configured task names and exit.
  #[arg(long)]
  pub list: bool,
}

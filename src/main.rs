//! `css-bundler` binary: runs configured bundle tasks and reports the outcome via exit code.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use css_bundler::{AssetBundler, BundleConfig, BundleError};

use crate::cli::Cli;

fn main() -> ExitCode {
  let cli = Cli::parse();
  if let Err(err) = init_tracing(cli.log_level.as_deref()) {
    eprintln!("error: {err:#}");
    return ExitCode::FAILURE;
  }

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      if let Some(cause) = err.chain().find_map(|cause| cause.downcast_ref::<BundleError>()) {
        error!(subject = %cause.subject(), "bundle failed");
      }
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = match &cli.config_path {
    Some(path) => BundleConfig::from_path(path),
    None => BundleConfig::discover(&cli.root),
  }
  .context("load bundle configuration")?;

  if cli.list {
    for name in config.task_names() {
      println!("{name}");
    }
    return Ok(());
  }

  let bundler = AssetBundler::new(&cli.root);
  for (name, task) in config.select(&cli.task)? {
    let report = bundler
      .run_task(task)
      .with_context(|| format!("task `{name}` failed"))?;
    info!(
      task = name,
      output = %report.output_path.display(),
      files = report.files,
      bytes = report.bytes,
      "bundle written"
    );
  }

  Ok(())
}

fn init_tracing(log_level: Option<&str>) -> Result<()> {
  let filter = match log_level {
    Some(level) => EnvFilter::try_new(level).context("invalid log level")?,
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|err| anyhow!(err))
    .context("initialize tracing subscriber")?;
  Ok(())
}

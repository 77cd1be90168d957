//! Bundle orchestrator: resolve → read → concatenate → minify → write.

use std::path::Path;

use tracing::{debug, info_span};

use crate::bundle::{concatenate_sources, write_atomically};
use crate::config::TaskConfig;
use crate::error::BundleResult;
use crate::minify::minify_css;
use crate::models::{BundleOutput, BundleReport, MinifyOptions, SourceSpec};
use crate::resolve::resolve_sources;

/// High-level helper producing a single minified stylesheet from ordered glob patterns.
#[derive(Debug, Clone, Copy)]
pub struct AssetBundler<'a> {
  root: &'a Path,
  dedupe: bool,
}

impl<'a> AssetBundler<'a> {
  /// Create a bundler resolving patterns and relative output directories against `root`.
  ///
  /// Files matched by several patterns are included once unless [`Self::with_dedupe`] turns
  /// that off.
  pub fn new(root: &'a Path) -> Self {
    Self { root, dedupe: true }
  }

  /// Choose whether overlapping patterns may include the same file more than once.
  pub fn with_dedupe(mut self, dedupe: bool) -> Self {
    self.dedupe = dedupe;
    self
  }

  /// Build the bundle in memory without touching the destination.
  pub fn prepare(
    &self,
    sources: &SourceSpec,
    output_name: &str,
    output_dir: &Path,
    options: &MinifyOptions,
  ) -> BundleResult<(BundleOutput, usize)> {
    let resolved = resolve_sources(self.root, sources, self.dedupe)?;
    debug!(files = ?resolved.relative_paths(), "resolved sources");

    let combined = concatenate_sources(&resolved)?;
    let content = minify_css(&combined, options);
    debug!(
      source_bytes = combined.len(),
      minified_bytes = content.len(),
      "minified bundle"
    );

    let path = self.root.join(output_dir).join(output_name);
    Ok((BundleOutput::new(path, content), resolved.len()))
  }

  /// Concatenate and minify `sources`, then atomically replace `output_dir/output_name`.
  ///
  /// Nothing is written unless every source was read successfully.
  pub fn bundle(
    &self,
    sources: &SourceSpec,
    output_name: &str,
    output_dir: &Path,
    options: &MinifyOptions,
  ) -> BundleResult<BundleReport> {
    let span = info_span!("bundle", output = output_name);
    let _guard = span.enter();

    let (output, files) = self.prepare(sources, output_name, output_dir, options)?;
    write_atomically(&output)?;

    Ok(BundleReport {
      bytes: output.content.len(),
      output_path: output.path,
      files,
    })
  }

  /// Run a configured task, honouring its own deduplication setting.
  pub fn run_task(&self, task: &TaskConfig) -> BundleResult<BundleReport> {
    self.with_dedupe(task.dedupe).bundle(
      &task.sources,
      &task.output_name,
      Path::new(&task.output_dir),
      &task.minify,
    )
  }
}

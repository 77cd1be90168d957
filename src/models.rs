//! Data structures produced and consumed while preparing a CSS bundle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Ordered list of glob patterns describing which stylesheets to concatenate.
///
/// Order is significant: the expansion of each pattern is appended after the expansion of
/// every pattern listed before it. Patterns prefixed with `!` remove previously matched files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SourceSpec {
  patterns: Vec<String>,
}

impl SourceSpec {
  /// Build a source list from patterns in concatenation order.
  pub fn new<I, S>(patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      patterns: patterns.into_iter().map(Into::into).collect(),
    }
  }

  /// Patterns in declared order.
  pub fn patterns(&self) -> &[String] {
    &self.patterns
  }

  /// Returns `true` when no patterns are declared.
  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}

/// Concrete source file matched while expanding a [`SourceSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
  /// Path on disk, rooted at the project directory.
  pub path: PathBuf,
  /// Root-relative path with `/` separators, as matched against the pattern.
  pub relative: String,
  /// Index of the pattern that contributed the file.
  pub pattern_index: usize,
}

/// Ordered set of files produced by expanding a [`SourceSpec`] against the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFileSet {
  files: Vec<ResolvedFile>,
}

impl ResolvedFileSet {
  pub(crate) fn from_files(files: Vec<ResolvedFile>) -> Self {
    Self { files }
  }

  /// Files in concatenation order.
  pub fn files(&self) -> &[ResolvedFile] {
    &self.files
  }

  /// Number of resolved files, duplicates included.
  pub fn len(&self) -> usize {
    self.files.len()
  }

  /// Returns `true` when nothing matched.
  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Root-relative paths in concatenation order.
  pub fn relative_paths(&self) -> Vec<&str> {
    self.files.iter().map(|file| file.relative.as_str()).collect()
  }
}

/// Minifier settings applied to the concatenated stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
  /// Wrap output so no line exceeds this many characters. `0` disables wrapping.
  pub max_line_length: usize,
  /// Remove comment blocks from the output.
  pub strip_comments: bool,
}

impl Default for MinifyOptions {
  fn default() -> Self {
    Self {
      max_line_length: 80,
      strip_comments: true,
    }
  }
}

/// Final artifact ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
  /// Destination path (`output_dir/output_name`).
  pub path: PathBuf,
  /// Minified stylesheet bytes.
  pub content: String,
}

impl BundleOutput {
  /// Pair a destination with its contents.
  pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      content: content.into(),
    }
  }

  /// Directory the artifact is written into.
  pub fn directory(&self) -> &Path {
    self
      .path
      .parent()
      .filter(|parent| !parent.as_os_str().is_empty())
      .unwrap_or_else(|| Path::new("."))
  }
}

/// Summary of a successful bundle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
  /// Path of the written bundle.
  pub output_path: PathBuf,
  /// Number of source files concatenated, duplicates included.
  pub files: usize,
  /// Size of the written bundle in bytes.
  pub bytes: usize,
}

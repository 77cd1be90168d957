use std::path::{Component, Path, PathBuf};

use wax::{CandidatePath, Glob, Pattern};

use crate::error::{BundleError, BundleResult};

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '<', '>', '(', ')', '\\'];

/// A single entry of a source list split into its polarity and glob body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePattern<'a> {
  /// Pattern exactly as declared.
  pub raw: &'a str,
  /// Glob text without the negation marker or a leading `./`.
  pub body: &'a str,
  /// `true` when the pattern excludes files from every positive pattern.
  pub negated: bool,
}

impl<'a> SourcePattern<'a> {
  /// Split a declared pattern into its polarity and body.
  pub fn parse(raw: &'a str) -> Self {
    let trimmed = raw.trim();
    let (negated, rest) = match trimmed.strip_prefix('!') {
      Some(rest) => (true, rest),
      None => (false, trimmed),
    };

    let mut body = rest;
    while let Some(stripped) = body.strip_prefix("./") {
      body = stripped;
    }

    Self { raw, body, negated }
  }

  /// Directory (or file) below which every match of the pattern must live.
  ///
  /// Walking only this prefix keeps resolution away from unrelated trees such as
  /// `node_modules` or `target`.
  pub fn literal_base(&self) -> PathBuf {
    self
      .body
      .split('/')
      .take_while(|segment| !segment.contains(GLOB_META))
      .filter(|segment| !segment.is_empty() && *segment != ".")
      .collect()
  }

  /// Compile the pattern body with the glob engine.
  pub fn compile(&self) -> BundleResult<Glob<'a>> {
    if self.body.is_empty() {
      return Err(self.resolution_error("pattern is empty"));
    }
    if Path::new(self.body).is_absolute() {
      return Err(self.resolution_error("patterns must be relative to the project root"));
    }
    if Path::new(self.body)
      .components()
      .any(|component| matches!(component, Component::ParentDir))
    {
      return Err(self.resolution_error("patterns must not leave the project root"));
    }

    Glob::new(self.body).map_err(|err| self.resolution_error(err))
  }

  pub(crate) fn resolution_error(&self, reason: impl ToString) -> BundleError {
    BundleError::PatternResolution {
      pattern: self.raw.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Check whether a compiled glob matches a root-relative, `/`-separated path.
pub fn glob_matches(glob: &Glob<'_>, relative: &str) -> bool {
  let candidate = CandidatePath::from(relative);
  glob.matched(&candidate).is_some()
}

/// Render a path relative to `root` with forward slashes for platform-independent matching.
pub fn to_relative_slash_path(root: &Path, path: &Path) -> Option<String> {
  let relative = path.strip_prefix(root).ok()?;
  let segments: Vec<&str> = relative
    .components()
    .map(|component| component.as_os_str().to_str())
    .collect::<Option<_>>()?;
  Some(segments.join("/"))
}

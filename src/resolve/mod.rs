//! Expansion of ordered glob patterns into the list of stylesheets to concatenate.
//!
//! Patterns are expanded one after another. Matches of a single pattern are sorted by their
//! root-relative path so output does not depend on directory enumeration order. Negated
//! patterns (`!glob`) exclude matching files from every positive pattern wherever they appear
//! in the list, and duplicate matches are either collapsed or kept depending on the caller's
//! choice.

mod dedupe;
mod pattern;
mod walk;

use std::path::Path;

use tracing::debug;

pub use pattern::SourcePattern;
use pattern::glob_matches;

use crate::error::BundleResult;
use crate::models::{ResolvedFile, ResolvedFileSet, SourceSpec};

/// Expand `spec` against `root` in declared order.
///
/// Negated patterns are collected first and filter the matches of all positive patterns, so
/// `["!a.css", "*.css"]` and `["*.css", "!a.css"]` resolve to the same files. With `dedupe`
/// set, a file matched by several patterns is only kept at its first position. Without it
/// every match is kept and a warning is logged per repeat.
pub fn resolve_sources(root: &Path, spec: &SourceSpec, dedupe: bool) -> BundleResult<ResolvedFileSet> {
  let patterns: Vec<SourcePattern<'_>> = spec
    .patterns()
    .iter()
    .map(|raw| SourcePattern::parse(raw))
    .collect();
  let exclusions = patterns
    .iter()
    .filter(|pattern| pattern.negated)
    .map(SourcePattern::compile)
    .collect::<BundleResult<Vec<_>>>()?;

  let mut files: Vec<ResolvedFile> = Vec::new();
  for (pattern_index, pattern) in patterns.iter().enumerate() {
    if pattern.negated {
      continue;
    }

    let mut excluded = 0usize;
    for (path, relative) in walk::expand_pattern(root, pattern)? {
      if exclusions.iter().any(|glob| glob_matches(glob, &relative)) {
        excluded += 1;
        continue;
      }
      files.push(ResolvedFile {
        path,
        relative,
        pattern_index,
      });
    }
    if excluded > 0 {
      debug!(pattern = pattern.raw, excluded, "skipped files matched by negated patterns");
    }
  }

  let files = if dedupe {
    dedupe::dedupe_files(files)?
  } else {
    dedupe::warn_on_duplicates(&files);
    files
  };

  Ok(ResolvedFileSet::from_files(files))
}

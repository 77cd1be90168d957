use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::pattern::{SourcePattern, glob_matches, to_relative_slash_path};
use crate::error::BundleResult;

/// File matched by a single pattern, paired with its root-relative slash path.
pub(crate) type PatternMatch = (PathBuf, String);

/// Expand one positive pattern against `root`, returning matches sorted by relative path.
///
/// A missing literal base directory yields no matches rather than an error.
pub(crate) fn expand_pattern(root: &Path, pattern: &SourcePattern<'_>) -> BundleResult<Vec<PatternMatch>> {
  let glob = pattern.compile()?;
  let base = root.join(pattern.literal_base());
  if !base.exists() {
    debug!(pattern = pattern.raw, base = %base.display(), "pattern base does not exist");
    return Ok(Vec::new());
  }

  let mut matches = Vec::new();
  for entry in WalkDir::new(&base).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(|err| pattern.resolution_error(err))?;
    if !entry.file_type().is_file() {
      continue;
    }

    let Some(relative) = to_relative_slash_path(root, entry.path()) else {
      continue;
    };

    if glob_matches(&glob, &relative) {
      matches.push((entry.into_path(), relative));
    }
  }

  matches.sort_by(|left, right| left.1.cmp(&right.1));
  debug!(pattern = pattern.raw, matches = matches.len(), "expanded pattern");
  Ok(matches)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn relatives(matches: &[PatternMatch]) -> Vec<&str> {
    matches.iter().map(|(_, relative)| relative.as_str()).collect()
  }

  #[test]
  fn sorts_matches_lexicographically() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b/nested")).unwrap();
    fs::write(root.join("b/y.css"), "y").unwrap();
    fs::write(root.join("b/x.css"), "x").unwrap();
    fs::write(root.join("b/nested/z.css"), "z").unwrap();
    fs::write(root.join("b/notes.txt"), "skip").unwrap();

    let pattern = SourcePattern::parse("b/**/*.css");
    let matches = expand_pattern(root, &pattern).unwrap();
    assert_eq!(relatives(&matches), ["b/nested/z.css", "b/x.css", "b/y.css"]);
  }

  #[test]
  fn literal_file_patterns_match_themselves() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.css"), "a").unwrap();

    let matches = expand_pattern(root, &SourcePattern::parse("a.css")).unwrap();
    assert_eq!(relatives(&matches), ["a.css"]);
    assert_eq!(matches[0].0, root.join("a.css"));
  }

  #[test]
  fn missing_base_yields_no_matches() {
    let dir = tempdir().unwrap();
    let matches = expand_pattern(dir.path(), &SourcePattern::parse("_css/**/*.css")).unwrap();
    assert!(matches.is_empty());
  }
}

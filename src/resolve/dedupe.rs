use std::collections::HashSet;

use same_file::Handle;
use tracing::{debug, warn};

use crate::error::{BundleError, BundleResult};
use crate::models::ResolvedFile;

/// Drop every file already seen earlier in the list.
///
/// Identity is decided by the underlying file rather than the path, so a stylesheet reached
/// through a symlink and through its real location is only included once.
pub(crate) fn dedupe_files(files: Vec<ResolvedFile>) -> BundleResult<Vec<ResolvedFile>> {
  let mut seen = HashSet::new();
  let mut kept = Vec::with_capacity(files.len());

  for file in files {
    let handle = Handle::from_path(&file.path).map_err(|source| BundleError::FileRead {
      path: file.path.clone(),
      source,
    })?;

    if seen.insert(handle) {
      kept.push(file);
    } else {
      debug!(path = %file.relative, "skipping duplicate match");
    }
  }

  Ok(kept)
}

/// Log every repeated file when duplicates are intentionally kept.
pub(crate) fn warn_on_duplicates(files: &[ResolvedFile]) {
  let mut seen = HashSet::new();
  for file in files {
    if !seen.insert(file.relative.as_str()) {
      warn!(
        path = %file.relative,
        pattern_index = file.pattern_index,
        "file matched by more than one pattern will be concatenated again"
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn resolved(root: &std::path::Path, relative: &str, pattern_index: usize) -> ResolvedFile {
    ResolvedFile {
      path: root.join(relative),
      relative: relative.to_string(),
      pattern_index,
    }
  }

  #[test]
  fn keeps_first_occurrence() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.css"), "a").unwrap();
    fs::write(root.join("b.css"), "b").unwrap();

    let files = vec![
      resolved(root, "a.css", 0),
      resolved(root, "b.css", 1),
      resolved(root, "a.css", 1),
    ];
    let kept = dedupe_files(files).unwrap();

    let relatives: Vec<_> = kept.iter().map(|file| file.relative.as_str()).collect();
    assert_eq!(relatives, ["a.css", "b.css"]);
    assert_eq!(kept[0].pattern_index, 0);
  }

  #[cfg(unix)]
  #[test]
  fn collapses_symlinked_aliases() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("real.css"), "a").unwrap();
    std::os::unix::fs::symlink(root.join("real.css"), root.join("alias.css")).unwrap();

    let files = vec![resolved(root, "alias.css", 0), resolved(root, "real.css", 1)];
    let kept = dedupe_files(files).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].relative, "alias.css");
  }

  #[test]
  fn missing_files_surface_as_read_errors() {
    let dir = tempdir().unwrap();
    let err = dedupe_files(vec![resolved(dir.path(), "gone.css", 0)]).unwrap_err();
    assert!(matches!(err, BundleError::FileRead { .. }));
  }
}

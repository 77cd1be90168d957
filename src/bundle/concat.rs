//! Reading resolved stylesheets and joining them in resolution order.

use std::fs;

use tracing::debug;

use crate::error::{BundleError, BundleResult};
use crate::models::ResolvedFileSet;

/// Separator placed between consecutive source files.
pub const SOURCE_SEPARATOR: &str = "\n";

/// Read every resolved file and join the contents in order.
///
/// The first unreadable file aborts the whole bundle; nothing is returned for the files read
/// before it.
pub fn concatenate_sources(files: &ResolvedFileSet) -> BundleResult<String> {
  let mut combined = String::new();

  for (index, file) in files.files().iter().enumerate() {
    let content = fs::read_to_string(&file.path).map_err(|source| BundleError::FileRead {
      path: file.path.clone(),
      source,
    })?;
    debug!(path = %file.relative, bytes = content.len(), "read stylesheet");

    if index > 0 {
      combined.push_str(SOURCE_SEPARATOR);
    }
    combined.push_str(&content);
  }

  Ok(combined)
}

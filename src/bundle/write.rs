//! Atomic replacement of the bundle artifact.

use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

use crate::error::{BundleError, BundleResult};
use crate::models::BundleOutput;

/// Write `output` by filling a temporary file next to the destination and renaming it over the
/// target.
///
/// The destination directory is created when missing. On any failure the temporary file is
/// removed and an existing artifact is left untouched.
pub fn write_atomically(output: &BundleOutput) -> BundleResult<()> {
  let directory = output.directory();
  fs::create_dir_all(directory).map_err(|source| BundleError::FileWrite {
    path: directory.to_path_buf(),
    source,
  })?;

  let mut staged = NamedTempFile::new_in(directory).map_err(|source| BundleError::FileWrite {
    path: directory.to_path_buf(),
    source,
  })?;

  let fill = |file: &mut NamedTempFile| -> std::io::Result<()> {
    file.write_all(output.content.as_bytes())?;
    file.flush()?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      file
        .as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    file.as_file().sync_all()
  };
  fill(&mut staged).map_err(|source| BundleError::FileWrite {
    path: staged.path().to_path_buf(),
    source,
  })?;

  staged
    .persist(&output.path)
    .map_err(|err| BundleError::FileWrite {
      path: output.path.clone(),
      source: err.error,
    })?;

  Ok(())
}

//! Filesystem staging primitives used by every pipeline stage
//!
//! These helpers are deliberately boring: they create, copy and delete, and
//! report failures as values instead of panicking. Absence of a path is
//! success for `remove_all`, so skipped pipeline stages prune cleanly.

use crate::core::error::{PackResult, ResultExt};
use std::fs;
use std::path::Path;

/// Recursively create a directory and all of its parents.
///
/// Idempotent; fails if a non-directory already occupies the path.
pub fn make_dirs(path: &Path) -> PackResult<()> {
  fs::create_dir_all(path).with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Copy a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> PackResult<()> {
  if let Some(parent) = dst.parent() {
    make_dirs(parent)?;
  }

  fs::copy(src, dst).with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
  Ok(())
}

/// Recursively delete a path. A path that does not exist is success.
pub fn remove_all(path: &Path) -> PackResult<()> {
  let meta = match fs::symlink_metadata(path) {
    Ok(meta) => meta,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
    Err(e) => return Err(e.into()),
  };

  let result = if meta.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  };

  result.with_context(|| format!("Failed to remove {}", path.display()))
}

/// True if the directory exists and contains at least one entry.
pub fn is_non_empty_dir(path: &Path) -> PackResult<bool> {
  match fs::read_dir(path) {
    Ok(mut entries) => Ok(entries.next().is_some()),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e.into()),
  }
}

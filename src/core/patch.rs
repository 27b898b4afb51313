//! Patch staging: select and copy the files an incremental update ships
//!
//! A patch only adds and overwrites. Entries that exist solely in the last
//! tree are dropped (patches never encode deletions), and directory entries
//! are dropped too since their file members stage themselves.

use crate::core::diff::{DiffEntry, DiffState};
use crate::core::error::{PackError, PackResult, StageError};
use crate::fsutil;
use std::path::{Component, Path, PathBuf};

/// Copy every shippable diff entry from `current_dir` into `patch_dir`,
/// preserving relative paths. Returns the number of staged files.
///
/// The first copy failure aborts the whole build with the offending path.
pub fn build(entries: &[DiffEntry], current_dir: &Path, patch_dir: &Path) -> PackResult<usize> {
  let mut staged = 0;

  for entry in entries {
    if !is_shippable(entry) {
      continue;
    }

    let rel = normalize_relative(&entry.relative_path).join(&entry.name);
    let src = current_dir.join(&rel);

    // Directory-level diff entries and anything else that is not a regular
    // file on disk are skipped; only file members ship.
    if !src.is_file() {
      continue;
    }

    let dst = patch_dir.join(&rel);
    fsutil::copy_file(&src, &dst).map_err(|e| {
      PackError::Stage(StageError::PatchStagingFailed {
        file: src.clone(),
        reason: e.to_string(),
      })
    })?;

    staged += 1;
  }

  Ok(staged)
}

fn is_shippable(entry: &DiffEntry) -> bool {
  entry.is_file && entry.state != DiffState::Equal && entry.state != DiffState::OnlyInLast
}

/// Strip a leading separator so the join cannot escape the intended subtree
fn normalize_relative(path: &Path) -> PathBuf {
  path
    .components()
    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
    .collect()
}

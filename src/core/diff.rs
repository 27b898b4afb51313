//! Content-aware directory diffing
//!
//! Walks two trees into path-keyed maps and compares them entry by entry.
//! Files present on both sides are compared by SHA-256 content digest, so a
//! touched-but-identical file reports as equal. Output ordering is the
//! sorted relative-path order of the union of both trees, independent of
//! filesystem iteration order.

use crate::core::error::{PackResult, ResultExt};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How an entry in the current tree relates to the last tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffState {
  /// Present on both sides with identical content
  Equal,
  /// Present on both sides with different content (or different kind)
  Changed,
  /// Present only in the current tree
  OnlyInCurrent,
  /// Present only in the last tree
  OnlyInLast,
}

/// One compared path
#[derive(Debug, Clone)]
pub struct DiffEntry {
  /// Path of the containing directory, relative to the tree root
  pub relative_path: PathBuf,

  /// File or directory name within `relative_path`
  pub name: String,

  pub state: DiffState,

  /// True when the entry is a regular file in the tree it exists in
  /// (the current tree wins when it exists on both sides)
  pub is_file: bool,
}

impl DiffEntry {
  /// Rejoin `relative_path` and `name` into one tree-relative path
  pub fn rel_file_path(&self) -> PathBuf {
    self.relative_path.join(&self.name)
  }
}

#[derive(Debug)]
struct TreeEntry {
  is_file: bool,
  digest: Option<[u8; 32]>,
}

/// Compare two directory trees with content-aware file comparison.
///
/// `current_dir` is side A: paths only there report `OnlyInCurrent`, paths
/// only under `last_dir` report `OnlyInLast`.
pub fn compare(current_dir: &Path, last_dir: &Path) -> PackResult<Vec<DiffEntry>> {
  let current = index_tree(current_dir)?;
  let last = index_tree(last_dir)?;

  let mut paths: Vec<&Path> = current.keys().map(PathBuf::as_path).collect();
  for path in last.keys() {
    if !current.contains_key(path) {
      paths.push(path.as_path());
    }
  }
  paths.sort();

  let mut entries = Vec::with_capacity(paths.len());
  for path in paths {
    let state = match (current.get(path), last.get(path)) {
      (Some(c), Some(l)) => {
        if c.is_file == l.is_file && c.digest == l.digest {
          DiffState::Equal
        } else {
          DiffState::Changed
        }
      }
      (Some(_), None) => DiffState::OnlyInCurrent,
      (None, Some(_)) => DiffState::OnlyInLast,
      (None, None) => unreachable!("path came from one of the two maps"),
    };

    let is_file = current
      .get(path)
      .or_else(|| last.get(path))
      .map(|e| e.is_file)
      .unwrap_or(false);

    entries.push(DiffEntry {
      relative_path: path.parent().map(Path::to_path_buf).unwrap_or_default(),
      name: path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default(),
      state,
      is_file,
    });
  }

  Ok(entries)
}

/// Index a tree into a map keyed by relative path. A missing root indexes
/// as an empty tree, so a skipped checkout diffs as all-added.
fn index_tree(root: &Path) -> PackResult<BTreeMap<PathBuf, TreeEntry>> {
  let mut map = BTreeMap::new();

  if !root.exists() {
    return Ok(map);
  }

  for entry in WalkDir::new(root).min_depth(1) {
    let entry = entry?;
    let rel = entry.path().strip_prefix(root)?.to_path_buf();
    let is_file = entry.file_type().is_file();

    let digest = if is_file {
      Some(hash_file(entry.path()).with_context(|| format!("Failed to hash {}", entry.path().display()))?)
    } else {
      None
    };

    map.insert(rel, TreeEntry { is_file, digest });
  }

  Ok(map)
}

fn hash_file(path: &Path) -> PackResult<[u8; 32]> {
  let mut file = File::open(path)?;
  let mut hasher = Sha256::new();
  io::copy(&mut file, &mut hasher)?;
  Ok(hasher.finalize().into())
}

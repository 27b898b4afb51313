//! Test helpers for integration tests

use anyhow::{Context, Result};
use relpack::core::error::PackResult;
use relpack::core::vcs::CheckoutProvider;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

/// Checkout provider mapping revision ids to in-memory file trees
///
/// Lets pipeline tests run end-to-end without a real repository.
#[derive(Default)]
pub struct FakeCheckout {
  revisions: BTreeMap<String, Vec<(PathBuf, Vec<u8>)>>,
}

impl FakeCheckout {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register the file tree materialized for `revision`
  pub fn revision(mut self, revision: &str, files: &[(&str, &str)]) -> Self {
    let tree = files
      .iter()
      .map(|(rel, content)| (PathBuf::from(rel), content.as_bytes().to_vec()))
      .collect();
    self.revisions.insert(revision.to_string(), tree);
    self
  }
}

impl CheckoutProvider for FakeCheckout {
  fn checkout(&self, target_dir: &Path, _repository: &str, revision: &str) -> PackResult<()> {
    let tree = self
      .revisions
      .get(revision)
      .ok_or_else(|| format!("revision not found: {}", revision))?;

    for (rel, content) in tree {
      let path = target_dir.join(rel);
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(path, content)?;
    }

    Ok(())
  }
}

/// A test git repository with revisions addressed by commit SHA
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    Ok(Self { _root: root, path })
  }

  /// Write files and commit them, returning the commit SHA
  pub fn commit(&self, message: &str, files: &[(&str, &str)]) -> Result<String> {
    for (rel, content) in files {
      let file = self.path.join(rel);
      if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(file, content)?;
    }

    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the relpack binary, returning its raw output (failure allowed)
pub fn run_relpack(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_relpack");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relpack")
}

/// Open a zip archive from a file on disk
pub fn open_zip(path: &Path) -> Result<ZipArchive<std::fs::File>> {
  let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
  Ok(ZipArchive::new(file)?)
}

/// Non-directory entry names of an archive, sorted
pub fn zip_file_names<R: Read + std::io::Seek>(zip: &mut ZipArchive<R>) -> Vec<String> {
  let mut names: Vec<String> = zip
    .file_names()
    .filter(|n| !n.ends_with('/'))
    .map(String::from)
    .collect();
  names.sort();
  names
}

/// Read one entry of an archive as bytes
pub fn zip_entry<R: Read + std::io::Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
  let mut entry = zip.by_name(name).with_context(|| format!("zip entry {}", name))?;
  let mut buf = Vec::new();
  entry.read_to_end(&mut buf)?;
  Ok(buf)
}

/// Open a zip archive nested inside another archive's entry
pub fn nested_zip<R: Read + std::io::Seek>(
  zip: &mut ZipArchive<R>,
  name: &str,
) -> Result<ZipArchive<std::io::Cursor<Vec<u8>>>> {
  let bytes = zip_entry(zip, name)?;
  Ok(ZipArchive::new(std::io::Cursor::new(bytes))?)
}

//! CLI surface: argument validation and a full build through the binary

use crate::helpers::{TestRepo, nested_zip, open_zip, run_relpack, zip_entry, zip_file_names};
use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn test_equal_revisions_rejected_before_any_mutation() -> Result<()> {
  let cwd = TempDir::new()?;

  let output = run_relpack(cwd.path(), &["-r", "repo://x", "-c", "42", "-l", "42"])?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("build error"), "stderr was: {}", stderr);

  // Nothing was created in the working directory
  assert_eq!(std::fs::read_dir(cwd.path())?.count(), 0);
  Ok(())
}

#[test]
fn test_missing_repository_is_a_usage_error() -> Result<()> {
  let cwd = TempDir::new()?;

  let output = run_relpack(cwd.path(), &["-c", "42"])?;

  assert!(!output.status.success());
  assert_eq!(std::fs::read_dir(cwd.path())?.count(), 0);
  Ok(())
}

#[test]
fn test_full_build_through_the_binary() -> Result<()> {
  let repo = TestRepo::new()?;
  let first = repo.commit(
    "first",
    &[("index.html", "<html v1>"), ("app.js", "one"), ("keep.css", "css")],
  )?;
  let second = repo.commit("second", &[("index.html", "<html v2>"), ("new.txt", "added")])?;

  let out = TempDir::new()?;
  let output = run_relpack(
    out.path(),
    &["-r", repo.path.to_str().unwrap(), "-c", &second, "-l", &first],
  )?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(output.status.success(), "relpack failed: {}", stderr);

  // Exactly one artifact, the release zip, remains in the prefix
  let entries: Vec<_> = std::fs::read_dir(out.path())?.collect::<std::io::Result<Vec<_>>>()?;
  assert_eq!(entries.len(), 1);
  let artifact = entries[0].path();
  let name = artifact.file_name().unwrap().to_string_lossy().into_owned();
  assert!(name.starts_with(&format!("bundle_c{}_l{}_release", second, first)));
  assert!(name.ends_with(".zip"));

  let mut release = open_zip(&artifact)?;
  let names = zip_file_names(&mut release);
  assert!(names.contains(&"web/index.html".to_string()));
  assert!(names.contains(&"web/new.txt".to_string()));
  assert!(names.contains(&"bundle.zip".to_string()));
  assert!(names.contains(&"patch.zip".to_string()));

  // The patch ships the modified and the added file only
  let mut patch = nested_zip(&mut release, "patch.zip")?;
  assert_eq!(zip_file_names(&mut patch), vec!["index.html", "new.txt"]);

  let manifest: Value = serde_json::from_slice(&zip_entry(&mut release, "update.json")?)?;
  assert_eq!(manifest["version"], second.as_str());
  assert_eq!(manifest["lastVersion"], first.as_str());

  Ok(())
}

#[test]
fn test_first_release_through_the_binary() -> Result<()> {
  let repo = TestRepo::new()?;
  let only = repo.commit("only", &[("index.html", "<html>")])?;

  let out = TempDir::new()?;
  let output = run_relpack(out.path(), &["-r", repo.path.to_str().unwrap(), "-c", &only])?;
  assert!(
    output.status.success(),
    "relpack failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  let entries: Vec<_> = std::fs::read_dir(out.path())?.collect::<std::io::Result<Vec<_>>>()?;
  assert_eq!(entries.len(), 1);

  let mut release = open_zip(&entries[0].path())?;
  let names = zip_file_names(&mut release);
  assert!(names.contains(&"web/index.html".to_string()));
  assert!(!names.iter().any(|n| n == "patch.zip"));

  let manifest: Value = serde_json::from_slice(&zip_entry(&mut release, "update.json")?)?;
  assert_eq!(manifest["lastVersion"], -1);

  Ok(())
}

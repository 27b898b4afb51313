//! SystemGit checkout provider against a local git repository

use crate::helpers::TestRepo;
use anyhow::Result;
use relpack::core::vcs::{CheckoutProvider, SystemGit};
use tempfile::TempDir;

#[test]
fn test_checkout_materializes_exact_revision() -> Result<()> {
  let repo = TestRepo::new()?;
  let first = repo.commit("first", &[("readme.md", "v1"), ("src/app.js", "one")])?;
  let _second = repo.commit("second", &[("readme.md", "v2"), ("src/app.js", "two")])?;

  let target = TempDir::new()?;
  let dir = target.path().join("current");
  std::fs::create_dir_all(&dir)?;

  SystemGit.checkout(&dir, repo.path.to_str().unwrap(), &first)?;

  assert_eq!(std::fs::read_to_string(dir.join("readme.md"))?, "v1");
  assert_eq!(std::fs::read_to_string(dir.join("src/app.js"))?, "one");
  // Only the working tree, no repository metadata
  assert!(!dir.join(".git").exists());

  Ok(())
}

#[test]
fn test_checkout_unknown_revision_fails() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.commit("only", &[("a.txt", "x")])?;

  let target = TempDir::new()?;
  let dir = target.path().join("current");
  std::fs::create_dir_all(&dir)?;

  let result = SystemGit.checkout(&dir, repo.path.to_str().unwrap(), "deadbeef");
  assert!(result.is_err());

  Ok(())
}

#[test]
fn test_checkout_unreachable_repository_fails() -> Result<()> {
  let target = TempDir::new()?;
  let dir = target.path().join("current");
  std::fs::create_dir_all(&dir)?;

  let result = SystemGit.checkout(&dir, "/no/such/repository", "main");
  assert!(result.is_err());

  Ok(())
}

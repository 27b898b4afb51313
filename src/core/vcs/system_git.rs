//! System git checkout backend - zero crate dependencies
//!
//! Clones the repository into the target directory, hard-resets the working
//! tree to the requested revision, then strips the repository metadata so
//! the target holds only the working tree. Subprocesses run with an isolated
//! environment (don't trust global config).

use crate::core::error::{PackError, PackResult, ResultExt};
use crate::fsutil;
use std::path::Path;
use std::process::Command;

use super::CheckoutProvider;

/// Checkout provider backed by the system `git` binary
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
  /// Create a safe git command with isolated environment
  ///
  /// - Clears environment variables, whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd() -> Command {
    let mut cmd = Command::new("git");

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }

  fn run(mut cmd: Command, what: &str) -> PackResult<()> {
    let output = cmd.output().with_context(|| format!("Failed to execute {}", what))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PackError::message(format!("{} failed: {}", what, stderr.trim())));
    }

    Ok(())
  }
}

impl CheckoutProvider for SystemGit {
  fn checkout(&self, target_dir: &Path, repository: &str, revision: &str) -> PackResult<()> {
    let mut clone = Self::git_cmd();
    clone.arg("clone").arg(repository).arg(target_dir);
    Self::run(clone, "git clone")?;

    let mut reset = Self::git_cmd();
    reset
      .arg("-C")
      .arg(target_dir)
      .args(["reset", "--hard", revision]);
    Self::run(reset, "git reset")?;

    // Only the working tree ships; releases carry no repository metadata
    fsutil::remove_all(&target_dir.join(".git"))?;

    Ok(())
  }
}

//! Checkout Provider seam and the system-git implementation
//!
//! The pipeline only requires the `CheckoutProvider` contract; which
//! version-control backend fulfils it is the caller's choice.

pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::PackResult;
use std::path::Path;

/// Materialize a repository at a specific revision into a target directory
pub trait CheckoutProvider {
  /// On success `target_dir` holds the working tree at exactly `revision`.
  /// Fails on network, auth, or revision-not-found conditions.
  fn checkout(&self, target_dir: &Path, repository: &str, revision: &str) -> PackResult<()>;
}

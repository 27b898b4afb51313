//! Release request: the immutable input of one pipeline run
//!
//! Built once at entry from CLI arguments and validated before any
//! filesystem mutation. Everything downstream borrows it.

use crate::core::error::{ConfigError, PackError, PackResult};
use chrono::Local;
use std::path::PathBuf;

/// Label used in artifact names and manifests when no last revision exists
pub const NO_LAST_REVISION: &str = "none";

/// Immutable description of one release build
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
  /// Repository URL or local path handed to the Checkout Provider
  pub repository: String,

  /// Revision the release is built from
  pub current: String,

  /// Previously released revision; `None` for a first release
  pub last: Option<String>,

  /// Directory the release workspace is created under
  pub output_prefix: PathBuf,
}

impl ReleaseRequest {
  /// Validate inputs and build a request.
  ///
  /// Rejects an empty repository locator, an empty current revision, and a
  /// current revision equal to the last one (the absent-last label counts,
  /// so `current = "none"` without a last revision is rejected too).
  pub fn new(
    repository: impl Into<String>,
    current: impl Into<String>,
    last: Option<String>,
    output_prefix: PathBuf,
  ) -> PackResult<Self> {
    let repository = repository.into();
    let current = current.into();
    let last = last.filter(|l| !l.is_empty());

    if repository.is_empty() {
      return Err(PackError::Config(ConfigError::MissingRepository));
    }
    if current.is_empty() {
      return Err(PackError::Config(ConfigError::MissingCurrentRevision));
    }

    let request = Self {
      repository,
      current,
      last,
      output_prefix,
    };

    if request.current == request.last_label() {
      return Err(PackError::Config(ConfigError::RevisionsEqual {
        revision: request.current,
      }));
    }

    Ok(request)
  }

  /// The last revision id, or the `none` label when absent
  pub fn last_label(&self) -> &str {
    self.last.as_deref().unwrap_or(NO_LAST_REVISION)
  }

  /// Release directory name: `bundle_c<current>_l<last>_release<timestamp>`
  pub fn release_dir_name(&self, timestamp: &str) -> String {
    format!("bundle_c{}_l{}_release{}", self.current, self.last_label(), timestamp)
  }

  /// Timestamp used in artifact names and the manifest (yyMMddhhmmss)
  pub fn release_timestamp() -> String {
    Local::now().format("%y%m%d%H%M%S").to_string()
  }
}

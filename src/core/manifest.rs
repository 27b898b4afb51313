//! Release manifest (`update.json`)
//!
//! The sole piece of persisted state in the artifact: written once at the
//! end of a successful pipeline run, never mutated. Deployment tooling reads
//! `lastVersion` to decide between the full bundle and the patch; the JSON
//! number `-1` means "no prior version".

use crate::core::error::{PackError, PackResult, StageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sentinel serialized when no last revision was requested
const NO_PRIOR_VERSION: i64 = -1;

/// The prior released version, or the `-1` sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastVersion {
  Sentinel(i64),
  Id(String),
}

impl LastVersion {
  pub fn none() -> Self {
    LastVersion::Sentinel(NO_PRIOR_VERSION)
  }
}

impl From<Option<&str>> for LastVersion {
  fn from(last: Option<&str>) -> Self {
    match last {
      Some(id) => LastVersion::Id(id.to_string()),
      None => LastVersion::none(),
    }
  }
}

/// Release descriptor persisted as `update.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseManifest {
  pub release_time: String,
  pub version: String,
  pub last_version: LastVersion,
}

impl ReleaseManifest {
  pub fn new(release_time: impl Into<String>, version: impl Into<String>, last: Option<&str>) -> Self {
    Self {
      release_time: release_time.into(),
      version: version.into(),
      last_version: last.into(),
    }
  }

  /// Serialize and write the manifest to `path`
  pub fn write(&self, path: &Path) -> PackResult<()> {
    let json = serde_json::to_string(self).map_err(|e| manifest_error(path, e))?;
    std::fs::write(path, json).map_err(|e| manifest_error(path, e))?;
    Ok(())
  }
}

fn manifest_error(path: &Path, err: impl std::fmt::Display) -> PackError {
  PackError::Stage(StageError::ManifestWriteFailed {
    path: path.to_path_buf(),
    reason: err.to_string(),
  })
}

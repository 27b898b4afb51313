//! Release pipeline: the ordered stages of one release transaction
//!
//! The pipeline owns the only mutable state of a run: the workspace
//! directory tree. Stages execute strictly in order, each depending on the
//! success of the previous one; the first failure short-circuits the rest
//! and surfaces with stage context. No automatic rollback: a failed run
//! leaves the workspace behind for inspection, and re-running requires the
//! operator to clear it first.

use crate::core::archive::Archiver;
use crate::core::diff;
use crate::core::error::{PackError, PackResult, StageError};
use crate::core::manifest::ReleaseManifest;
use crate::core::patch;
use crate::core::request::ReleaseRequest;
use crate::core::vcs::CheckoutProvider;
use crate::fsutil;
use crate::ui::log;
use std::fs;
use std::path::{Path, PathBuf};

/// Derived paths of one run's workspace, owned exclusively by that run
#[derive(Debug, Clone)]
pub struct ReleaseWorkspace {
  /// Workspace root; consumed into the final artifact at the end of the run
  pub root: PathBuf,
  pub current_dir: PathBuf,
  pub last_dir: PathBuf,
  pub patch_dir: PathBuf,
  pub web_dir: PathBuf,
  pub bundle_zip: PathBuf,
  pub patch_zip: PathBuf,
  pub update_json: PathBuf,
}

impl ReleaseWorkspace {
  fn new(root: PathBuf) -> Self {
    Self {
      current_dir: root.join("current"),
      last_dir: root.join("last"),
      patch_dir: root.join("patch"),
      web_dir: root.join("web"),
      bundle_zip: root.join("bundle.zip"),
      patch_zip: root.join("patch.zip"),
      update_json: root.join("update.json"),
      root,
    }
  }
}

/// Orchestrates staging, checkout, diffing, patch building, archiving,
/// manifest generation and cleanup into one release transaction
pub struct ReleasePipeline<'a> {
  request: &'a ReleaseRequest,
  checkout: &'a dyn CheckoutProvider,
  archiver: &'a dyn Archiver,
  timestamp: String,
  workspace: ReleaseWorkspace,
}

impl<'a> ReleasePipeline<'a> {
  pub fn new(request: &'a ReleaseRequest, checkout: &'a dyn CheckoutProvider, archiver: &'a dyn Archiver) -> Self {
    Self::with_timestamp(request, checkout, archiver, ReleaseRequest::release_timestamp())
  }

  /// Build a pipeline with an explicit timestamp (deterministic artifact names)
  pub fn with_timestamp(
    request: &'a ReleaseRequest,
    checkout: &'a dyn CheckoutProvider,
    archiver: &'a dyn Archiver,
    timestamp: String,
  ) -> Self {
    let root = request.output_prefix.join(request.release_dir_name(&timestamp));
    Self {
      request,
      checkout,
      archiver,
      timestamp,
      workspace: ReleaseWorkspace::new(root),
    }
  }

  /// The workspace this run will own
  pub fn workspace(&self) -> &ReleaseWorkspace {
    &self.workspace
  }

  /// Run the release to completion or first failure.
  ///
  /// Returns the path of the final release archive.
  pub fn run(&self) -> PackResult<PathBuf> {
    self.ensure_workspace_empty()?;
    self.stage_directories()?;
    self.checkout_current()?;
    self.checkout_last()?;
    self.build_bundle()?;
    self.build_patch()?;
    self.promote_current()?;
    self.write_manifest()?;
    self.prune_temporaries()?;
    self.package_release()
  }

  /// Stage 1: the workspace root must not exist or must be empty
  fn ensure_workspace_empty(&self) -> PackResult<()> {
    if fsutil::is_non_empty_dir(&self.workspace.root)? {
      return Err(PackError::Stage(StageError::WorkspaceNotEmpty {
        path: self.workspace.root.clone(),
      }));
    }
    Ok(())
  }

  /// Stage 2: create the checkout target directories
  fn stage_directories(&self) -> PackResult<()> {
    log::section("stage workspace directories");

    let mut targets = vec![&self.workspace.current_dir];
    if self.request.last.is_some() {
      targets.push(&self.workspace.last_dir);
    }

    for dir in targets {
      fsutil::make_dirs(dir).map_err(|e| {
        PackError::Stage(StageError::StagingFailed {
          path: dir.clone(),
          reason: e.to_string(),
        })
      })?;
    }

    Ok(())
  }

  /// Stage 3: checkout the current revision
  fn checkout_current(&self) -> PackResult<()> {
    log::section("checkout current version");
    self.checkout_into(&self.workspace.current_dir, &self.request.current)
  }

  /// Stage 4: checkout the last revision, skipped for a first release
  fn checkout_last(&self) -> PackResult<()> {
    log::section("checkout last version");

    let Some(last) = self.request.last.as_deref() else {
      log::info("there is NO last version");
      return Ok(());
    };

    self.checkout_into(&self.workspace.last_dir, last)
  }

  fn checkout_into(&self, target: &Path, revision: &str) -> PackResult<()> {
    self
      .checkout
      .checkout(target, &self.request.repository, revision)
      .map_err(|e| {
        PackError::Stage(StageError::CheckoutFailed {
          revision: revision.to_string(),
          reason: e.to_string(),
        })
      })
  }

  /// Stage 5: archive the full current tree into bundle.zip
  fn build_bundle(&self) -> PackResult<()> {
    log::section("make bundle");
    self.archive_into(&self.workspace.current_dir, &self.workspace.bundle_zip)
  }

  /// Stage 6: diff current against last, stage the patch set, archive it.
  ///
  /// Skipped for a first release. A patch.zip is written whenever a last
  /// revision exists, even when the trees are identical (empty archive).
  fn build_patch(&self) -> PackResult<()> {
    log::section("make patch");

    if self.request.last.is_none() {
      log::info("there is NO last version");
      return Ok(());
    }

    let entries = diff::compare(&self.workspace.current_dir, &self.workspace.last_dir)?;

    fsutil::make_dirs(&self.workspace.patch_dir)?;
    let staged = patch::build(&entries, &self.workspace.current_dir, &self.workspace.patch_dir)?;
    log::info(&format!("{} file(s) in patch", staged));

    self.archive_into(&self.workspace.patch_dir, &self.workspace.patch_zip)
  }

  fn archive_into(&self, source: &Path, dest: &Path) -> PackResult<()> {
    self.archiver.archive(source, dest).map_err(|e| {
      PackError::Stage(StageError::ArchiveFailed {
        archive: dest.to_path_buf(),
        reason: e.to_string(),
      })
    })
  }

  /// Stage 7: promote the current tree to its published name
  fn promote_current(&self) -> PackResult<()> {
    log::section("promote web resources");

    fs::rename(&self.workspace.current_dir, &self.workspace.web_dir).map_err(|e| {
      PackError::Stage(StageError::PromotionFailed {
        from: self.workspace.current_dir.clone(),
        to: self.workspace.web_dir.clone(),
        reason: e.to_string(),
      })
    })
  }

  /// Stage 8: write update.json, the artifact's only persisted state
  fn write_manifest(&self) -> PackResult<()> {
    log::section("generate update.json");

    let manifest = ReleaseManifest::new(&self.timestamp, &self.request.current, self.request.last.as_deref());
    manifest.write(&self.workspace.update_json)
  }

  /// Stage 9: delete the temporary trees; absence is fine since the stages
  /// that create them may have been skipped
  fn prune_temporaries(&self) -> PackResult<()> {
    log::section("clean temp files");

    for dir in [&self.workspace.last_dir, &self.workspace.patch_dir] {
      fsutil::remove_all(dir).map_err(|e| {
        PackError::Stage(StageError::CleanupFailed {
          path: dir.clone(),
          reason: e.to_string(),
        })
      })?;
    }

    Ok(())
  }

  /// Stage 10: archive the workspace one directory above it, then delete it
  fn package_release(&self) -> PackResult<PathBuf> {
    log::section("build release bundle");

    let filename = format!("{}.zip", self.request.release_dir_name(&self.timestamp));
    let release_path = match self.workspace.root.parent() {
      Some(parent) => parent.join(filename),
      None => PathBuf::from(filename),
    };

    self.archive_into(&self.workspace.root, &release_path)?;

    fsutil::remove_all(&self.workspace.root).map_err(|e| {
      PackError::Stage(StageError::CleanupFailed {
        path: self.workspace.root.clone(),
        reason: e.to_string(),
      })
    })?;

    Ok(release_path)
  }
}

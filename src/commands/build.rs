//! Build command: wire the CLI inputs into one pipeline run

use crate::core::archive::ZipArchiver;
use crate::core::error::PackResult;
use crate::core::pipeline::ReleasePipeline;
use crate::core::request::ReleaseRequest;
use crate::core::vcs::SystemGit;
use crate::ui::log;
use std::env;
use std::path::PathBuf;

/// Run the release build command.
///
/// Validates the request before any filesystem mutation, then drives the
/// pipeline with the system-git checkout provider and the zip archiver.
/// Returns the path of the produced release archive.
pub fn run_build(
  prefix: Option<PathBuf>,
  current: String,
  last: Option<String>,
  repository: String,
) -> PackResult<PathBuf> {
  let cwd = env::current_dir()?;
  let output_prefix = match prefix {
    // Joining an absolute prefix yields the prefix itself
    Some(p) => cwd.join(p),
    None => cwd,
  };

  let request = ReleaseRequest::new(repository, current, last, output_prefix)?;

  let checkout = SystemGit;
  let archiver = ZipArchiver;
  let pipeline = ReleasePipeline::new(&request, &checkout, &archiver);

  log::info(&format!(
    "release workspace: {}",
    pipeline.workspace().root.display()
  ));

  let artifact = pipeline.run()?;

  log::success(&format!("build success: {}", artifact.display()));

  Ok(artifact)
}

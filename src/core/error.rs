//! Error types for relpack with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Configuration problems are reported before
//! any filesystem mutation; every pipeline stage failure names its stage.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relpack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing inputs)
  User = 1,
  /// System error (git, archive, I/O)
  System = 2,
  /// Precondition failure (non-empty workspace)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relpack
#[derive(Debug)]
pub enum PackError {
  /// Configuration errors, detected before any I/O
  Config(ConfigError),

  /// Pipeline stage failures
  Stage(StageError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PackError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PackError::Message { message, context, help } => PackError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PackError::Config(_) => ExitCode::User,
      PackError::Stage(StageError::WorkspaceNotEmpty { .. }) => ExitCode::Validation,
      PackError::Stage(_) => ExitCode::System,
      PackError::Io(_) => ExitCode::System,
      PackError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PackError::Config(e) => e.help_message(),
      PackError::Stage(e) => e.help_message(),
      PackError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackError::Config(e) => write!(f, "{}", e),
      PackError::Stage(e) => write!(f, "{}", e),
      PackError::Io(e) => write!(f, "I/O error: {}", e),
      PackError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PackError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PackError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PackError {
  fn from(err: io::Error) -> Self {
    PackError::Io(err)
  }
}

impl From<String> for PackError {
  fn from(msg: String) -> Self {
    PackError::message(msg)
  }
}

impl From<&str> for PackError {
  fn from(msg: &str) -> Self {
    PackError::message(msg)
  }
}

impl From<serde_json::Error> for PackError {
  fn from(err: serde_json::Error) -> Self {
    PackError::message(format!("JSON error: {}", err))
  }
}

impl From<zip::result::ZipError> for PackError {
  fn from(err: zip::result::ZipError) -> Self {
    PackError::message(format!("Archive error: {}", err))
  }
}

impl From<walkdir::Error> for PackError {
  fn from(err: walkdir::Error) -> Self {
    PackError::message(format!("Directory walk error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for PackError {
  fn from(err: std::path::StripPrefixError) -> Self {
    PackError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for PackError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    PackError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to PackError (for test helpers)
impl From<anyhow::Error> for PackError {
  fn from(err: anyhow::Error) -> Self {
    PackError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Repository locator missing or empty
  MissingRepository,

  /// Current revision missing or empty
  MissingCurrentRevision,

  /// Current and last revisions are the same
  RevisionsEqual { revision: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingRepository => {
        Some("Pass the repository URL or path with --repository <url>.".to_string())
      }
      ConfigError::MissingCurrentRevision => Some("Pass the revision to release with --current <rev>.".to_string()),
      ConfigError::RevisionsEqual { .. } => {
        Some("An incremental release needs two distinct revisions. Omit --last for a first release.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingRepository => write!(f, "No repository given"),
      ConfigError::MissingCurrentRevision => write!(f, "No current revision given"),
      ConfigError::RevisionsEqual { revision } => {
        write!(f, "Current revision equals last revision: '{}'", revision)
      }
    }
  }
}

/// Pipeline stage failures
///
/// Each variant carries enough context (stage, path, underlying cause) for an
/// operator to diagnose and re-run manually. The pipeline never rolls back.
#[derive(Debug)]
pub enum StageError {
  /// Workspace root pre-exists and is not empty
  WorkspaceNotEmpty { path: PathBuf },

  /// Could not create the checkout staging directories
  StagingFailed { path: PathBuf, reason: String },

  /// Checkout Provider failed to materialize a revision
  CheckoutFailed { revision: String, reason: String },

  /// Archiver failed to produce an archive
  ArchiveFailed { archive: PathBuf, reason: String },

  /// Copying a changed file into the patch root failed
  PatchStagingFailed { file: PathBuf, reason: String },

  /// Renaming the current tree to its published name failed
  PromotionFailed { from: PathBuf, to: PathBuf, reason: String },

  /// Serializing or writing the release manifest failed
  ManifestWriteFailed { path: PathBuf, reason: String },

  /// Deleting a temporary directory failed
  CleanupFailed { path: PathBuf, reason: String },
}

impl StageError {
  fn help_message(&self) -> Option<String> {
    match self {
      StageError::WorkspaceNotEmpty { path } => Some(format!(
        "Clear the directory and re-run: rm -rf {}",
        path.display()
      )),
      StageError::CheckoutFailed { .. } => {
        Some("Check the repository locator, your network access, and that the revision exists.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StageError::WorkspaceNotEmpty { path } => {
        write!(f, "Workspace directory {} is NOT empty", path.display())
      }
      StageError::StagingFailed { path, reason } => {
        write!(f, "Could not stage directory {}: {}", path.display(), reason)
      }
      StageError::CheckoutFailed { revision, reason } => {
        write!(f, "Checkout of revision '{}' failed: {}", revision, reason)
      }
      StageError::ArchiveFailed { archive, reason } => {
        write!(f, "Could not build archive {}: {}", archive.display(), reason)
      }
      StageError::PatchStagingFailed { file, reason } => {
        write!(f, "Could not copy {} into the patch: {}", file.display(), reason)
      }
      StageError::PromotionFailed { from, to, reason } => {
        write!(
          f,
          "Could not rename {} to {}: {}",
          from.display(),
          to.display(),
          reason
        )
      }
      StageError::ManifestWriteFailed { path, reason } => {
        write!(f, "Could not write manifest {}: {}", path.display(), reason)
      }
      StageError::CleanupFailed { path, reason } => {
        write!(f, "Could not remove {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for relpack
pub type PackResult<T> = Result<T, PackError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PackResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PackError>,
{
  fn context(self, ctx: impl Into<String>) -> PackResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PackError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

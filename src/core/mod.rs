//! Core engine for relpack
//!
//! The fundamental building blocks of a release build:
//!
//! - **archive**: Archiver seam and the zip implementation
//! - **diff**: Content-aware directory tree comparison
//! - **error**: Error types with contextual help messages and exit codes
//! - **manifest**: The update.json release descriptor
//! - **patch**: Incremental patch staging
//! - **pipeline**: The ordered release stages (the orchestrator)
//! - **request**: Validated, immutable release inputs
//! - **vcs**: Checkout Provider seam (SystemGit)

pub mod archive;
pub mod diff;
pub mod error;
pub mod manifest;
pub mod patch;
pub mod pipeline;
pub mod request;
pub mod vcs;

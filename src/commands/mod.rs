//! CLI commands for relpack
//!
//! - **build**: run the full release pipeline for one request

pub mod build;

pub use build::run_build;

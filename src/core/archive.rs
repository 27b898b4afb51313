//! Archiver seam and the zip implementation
//!
//! The pipeline only needs "compress this directory into that file"; the
//! trait keeps compression out of the core and lets tests substitute their
//! own archiver.

use crate::core::error::{PackResult, ResultExt};
use std::fs::File;
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Compress a directory into a single archive file
pub trait Archiver {
  /// Produce `dest_archive` containing `source_dir`'s contents with paths
  /// relative to `source_dir`. An empty source yields a valid empty archive.
  fn archive(&self, source_dir: &Path, dest_archive: &Path) -> PackResult<()>;
}

/// Zip archiver with deflate compression
#[derive(Debug, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
  fn archive(&self, source_dir: &Path, dest_archive: &Path) -> PackResult<()> {
    let file = File::create(dest_archive)
      .with_context(|| format!("Failed to create archive {}", dest_archive.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // walkdir sorted by file name gives a stable entry order
    let walker = WalkDir::new(source_dir)
      .min_depth(1)
      .sort_by_file_name()
      .into_iter();

    for entry in walker {
      let entry = entry?;
      let rel = entry.path().strip_prefix(source_dir)?;
      let rel_name = rel.to_string_lossy().replace('\\', "/");

      if entry.file_type().is_dir() {
        zip.add_directory(rel_name, options)?;
        continue;
      }

      let mut source = File::open(entry.path())
        .with_context(|| format!("Failed to open {} for archiving", entry.path().display()))?;
      zip.start_file(rel_name, options)?;
      io::copy(&mut source, &mut zip)
        .with_context(|| format!("Failed to compress {}", entry.path().display()))?;
    }

    zip.finish()?;
    Ok(())
  }
}

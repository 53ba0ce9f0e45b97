//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations behind the [`SourceStore`]
//! trait so the processor can be driven against something other than the disk.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

/// Storage for the source files being rewritten.
pub trait SourceStore {
  /// Reads the full content of a file.
  fn read(&self, path: &Path) -> Result<String>;

  /// Replaces the full content of a file.
  fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// File I/O operations backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The complete file content as a String.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Write file content through a temporary file.
  ///
  /// The content is written to a temporary file next to `path`, flushed to
  /// disk, given the permissions of the file it replaces and then renamed over
  /// it. An interrupted run leaves either the old or the new content, never a
  /// truncated file. When `path` is a symlink, the file it points to is
  /// replaced and the link is left in place.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    // A symlink keeps pointing at its target, which receives the new content
    let target = if std::fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink()) {
      std::fs::canonicalize(path).with_context(|| format!("Failed to resolve symlink: {}", path.display()))?
    } else {
      path.to_path_buf()
    };

    let parent = match target.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let permissions = std::fs::metadata(&target).ok().map(|metadata| metadata.permissions());

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)
      .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;

    temp_file
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write file: {}", path.display()))?;

    temp_file
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to sync file: {}", path.display()))?;

    if let Some(permissions) = permissions {
      temp_file
        .as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to copy permissions to: {}", path.display()))?;
    }

    temp_file
      .persist(&target)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
  }
}

impl SourceStore for FileIO {
  fn read(&self, path: &Path) -> Result<String> {
    Self::read_full_content(path)
  }

  fn write(&self, path: &Path, content: &str) -> Result<()> {
    Self::write_file(path, content)
  }
}

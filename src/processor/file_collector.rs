//! # File Collector Module
//!
//! This module provides directory traversal for the processor and path
//! helpers used when displaying results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// File collector for directory traversal.
///
/// Roots are walked depth-first with entries sorted by file name, so runs
/// over the same tree always visit files in the same order.
/// Symlinked directories are not descended into, but symlinks to files are
/// yielded like regular files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileCollector;

impl FileCollector {
  /// Creates a new FileCollector.
  pub const fn new() -> Self {
    Self
  }

  /// Walks a directory tree and yields every file below it.
  ///
  /// Traversal errors (unreadable directories, a missing root) are yielded
  /// in place so the caller decides whether they abort the run.
  ///
  /// # Parameters
  ///
  /// * `root` - The directory to traverse
  pub fn walk(&self, root: &Path) -> impl Iterator<Item = Result<PathBuf>> + use<> {
    debug!("Scanning directory: {}", root.display());

    let root_display = root.display().to_string();
    WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .filter_map(move |entry| match entry {
        Ok(entry) if is_file_entry(&entry) => Some(Ok(entry.into_path())),
        Ok(_) => None,
        Err(e) => Some(Err::<PathBuf, _>(e).with_context(|| format!("Failed to walk directory: {}", root_display))),
      })
  }
}

/// A regular file, or a symlink that does not point at a directory.
///
/// Dangling links count as files so that reading them reports the error.
fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
  entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
}

/// Makes a path relative to `base` for display, falling back to the path
/// itself.
pub fn display_path(path: &Path, base: Option<&Path>) -> String {
  let Some(base) = base else {
    return path.display().to_string();
  };

  if let Ok(stripped) = path.strip_prefix(base) {
    return stripped.display().to_string();
  }

  if path.is_absolute() == base.is_absolute()
    && let Some(relative) = pathdiff::diff_paths(path, base)
  {
    return relative.display().to_string();
  }

  path.display().to_string()
}

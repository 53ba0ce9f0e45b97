//! # Diff Module
//!
//! This module contains functionality for creating and rendering diffs between original and rewritten content.
//! It's used to show which header changes a run makes, or would make in check mode.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
///
/// This struct handles:
/// - Generating diffs between original and rewritten content
/// - Displaying diffs to stderr
/// - Saving diffs to a file
#[derive(Debug, Default)]
pub struct DiffManager {
  /// Whether to show diffs on stderr
  pub show_diff: bool,

  /// Path to save the diffs to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager with the specified configuration.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to show diffs on stderr
  /// * `save_diff_path` - Path to save the diffs to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Returns `true` if diffs are shown or saved.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      File::create(diff_path).with_context(|| format!("Failed to create diff file: {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff between the original and new content.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = format!("Diff for {}:\n", path.display());

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };

      diff_content.push_str(sign);
      diff_content.push_str(change.value());
      if change.missing_newline() {
        diff_content.push('\n');
      }
    }

    diff_content
  }

  /// Displays and/or saves a diff between the original and new content.
  ///
  /// If show_diff is enabled, the diff is written to stderr. If
  /// save_diff_path is provided, the diff is appended to that file, creating
  /// a single consolidated diff for the run.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file being processed
  /// * `original` - Original file content
  /// * `new` - New file content with the replaced header
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff_content = Self::render(path, original, new);

    if self.show_diff {
      eprintln!("{}", diff_content);
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;

      writeln!(file, "{}", diff_content)
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_render_header_change() {
    let diff = DiffManager::render(
      Path::new("Foo.swift"),
      "// old\n\nimport X\n",
      "// new\n//\n\nimport X\n",
    );

    assert_eq!(
      diff,
      "Diff for Foo.swift:\n-// old\n+// new\n+//\n \n import X\n"
    );
  }

  #[test]
  fn test_render_missing_trailing_newline() {
    let diff = DiffManager::render(Path::new("a.swift"), "// a\nx", "// b\nx");
    assert!(diff.ends_with(" x\n"));
  }

  #[test]
  fn test_saved_diffs_are_consolidated() -> Result<()> {
    let dir = tempdir()?;
    let diff_path = dir.path().join("changes.diff");
    std::fs::write(&diff_path, "stale content from a previous run\n")?;

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init()?;
    manager.display_diff(Path::new("a.swift"), "// a\n", "// b\n")?;
    manager.display_diff(Path::new("b.swift"), "// c\n", "// d\n")?;

    let saved = std::fs::read_to_string(&diff_path)?;
    assert!(!saved.contains("stale"));
    assert!(saved.contains("Diff for a.swift:\n-// a\n+// b\n"));
    assert!(saved.contains("Diff for b.swift:\n-// c\n+// d\n"));
    Ok(())
  }

  #[test]
  fn test_disabled_manager_writes_nothing() -> Result<()> {
    let manager = DiffManager::default();
    assert!(!manager.is_enabled());
    manager.display_diff(Path::new("a.swift"), "a", "b")
  }
}

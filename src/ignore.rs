//! # Ignore Module
//!
//! This module contains functionality for deciding which files are excluded
//! from header rewriting by glob patterns given on the command line or in the
//! configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

use crate::verbose_log;

/// Manager for handling ignore patterns.
///
/// Patterns are matched against the path as walked (including the root it
/// was found under) and against every trailing sub-path, so `Generated/**`
/// excludes `Sources/Generated/Foo.swift` as well.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use reheader::ignore::IgnoreManager;
///
/// # fn main() -> anyhow::Result<()> {
/// let manager = IgnoreManager::new(vec!["**/Autogenerated/**".to_string()])?;
///
/// assert!(manager.is_ignored(Path::new("Tests/Autogenerated/Mock.swift")));
/// assert!(!manager.is_ignored(Path::new("Tests/PeripheralTest.swift")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreManager {
  /// Compiled glob patterns
  patterns: Vec<Pattern>,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

impl IgnoreManager {
  /// Creates a new ignore manager with the specified glob patterns.
  ///
  /// A pattern ending in `/` excludes everything below a directory of that
  /// name.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the patterns is not a valid glob.
  pub fn new(patterns: Vec<String>) -> Result<Self> {
    let mut compiled = Vec::with_capacity(patterns.len());

    for pattern in patterns {
      // Normalize pattern: convert backslashes to forward slashes
      let pattern = pattern.replace('\\', "/");
      let pattern = match pattern.strip_suffix('/') {
        Some(dir_pattern) => format!("{dir_pattern}/**"),
        None => pattern,
      };

      compiled.push(Pattern::new(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?);
    }

    Ok(Self { patterns: compiled })
  }

  /// Returns `true` when no patterns are configured.
  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Checks whether a path matches any ignore pattern.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.patterns.is_empty() {
      return false;
    }

    let normalized = path.to_string_lossy().replace('\\', "/");
    let normalized = normalized.trim_start_matches("./");

    let mut candidate = normalized;
    loop {
      if let Some(pattern) = self.patterns.iter().find(|p| p.matches_with(candidate, MATCH_OPTIONS)) {
        verbose_log!("Ignoring {} (matches '{}')", path.display(), pattern.as_str());
        return true;
      }

      match candidate.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => candidate = rest,
        _ => return false,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn manager(patterns: &[&str]) -> IgnoreManager {
    IgnoreManager::new(patterns.iter().map(|p| p.to_string()).collect()).expect("valid patterns")
  }

  #[test]
  fn test_empty_manager_ignores_nothing() {
    let manager = manager(&[]);
    assert!(manager.is_empty());
    assert!(!manager.is_ignored(Path::new("Source/Foo.swift")));
  }

  #[test]
  fn test_file_name_pattern() {
    let manager = manager(&["*Mock.swift"]);
    assert!(manager.is_ignored(Path::new("Tests/Autogenerated/PeripheralMock.swift")));
    assert!(!manager.is_ignored(Path::new("Tests/Peripheral.swift")));
  }

  #[test]
  fn test_directory_pattern() {
    let manager = manager(&["Autogenerated/"]);
    assert!(manager.is_ignored(Path::new("./Tests/Autogenerated/Mock.swift")));
    assert!(manager.is_ignored(Path::new("Autogenerated/nested/Mock.swift")));
    assert!(!manager.is_ignored(Path::new("Tests/NotAutogenerated.swift")));
  }

  #[test]
  fn test_anchored_double_star_pattern() {
    let manager = manager(&["Source/**/Internal*.swift"]);
    assert!(manager.is_ignored(Path::new("Source/a/b/InternalQueue.swift")));
    assert!(!manager.is_ignored(Path::new("Source/a/b/Queue.swift")));
  }

  #[test]
  fn test_backslash_patterns_are_normalized() {
    let manager = manager(&["Tests\\Autogenerated\\*"]);
    assert!(manager.is_ignored(Path::new("Tests/Autogenerated/Mock.swift")));
  }

  #[test]
  fn test_invalid_pattern() {
    let err = IgnoreManager::new(vec!["[".to_string()]).expect_err("invalid glob must fail");
    assert!(err.to_string().contains("Invalid glob pattern"));
  }
}

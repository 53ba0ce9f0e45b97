//! # File Filter Module
//!
//! This module contains components for deciding which of the walked files get
//! their header rewritten: the configured extension and the ignore patterns.

use std::path::Path;

use anyhow::Result;

use crate::ignore::IgnoreManager;
use crate::verbose_log;

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file to check
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the file should be processed and why
  /// not if applicable.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter that only passes files whose name ends with `.<extension>`.
///
/// Matching is case-sensitive, so `Foo.SWIFT` is not a Swift source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
  suffix: String,
}

impl ExtensionFilter {
  /// Creates a filter for the given extension, written without the leading
  /// dot (e.g. "swift").
  pub fn new(extension: &str) -> Self {
    Self {
      suffix: format!(".{}", extension.trim_start_matches('.')),
    }
  }

  /// The extension this filter passes, without the leading dot.
  pub fn extension(&self) -> &str {
    &self.suffix[1..]
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let matches = path
      .file_name()
      .is_some_and(|name| name.to_string_lossy().ends_with(&self.suffix));

    if matches {
      Ok(FilterResult::process())
    } else {
      Ok(FilterResult::skip(format!("Extension is not {}", self.suffix)))
    }
  }
}

/// Filter that excludes files matching ignore patterns.
pub struct IgnoreFilter {
  ignore_manager: IgnoreManager,
}

impl IgnoreFilter {
  /// Creates a new IgnoreFilter with the given IgnoreManager.
  pub const fn new(ignore_manager: IgnoreManager) -> Self {
    Self { ignore_manager }
  }

  /// Creates a new IgnoreFilter from a list of ignore patterns.
  pub fn from_patterns(patterns: Vec<String>) -> Result<Self> {
    let ignore_manager = IgnoreManager::new(patterns)?;
    Ok(Self::new(ignore_manager))
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.ignore_manager.is_ignored(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      Ok(FilterResult::skip("Matches ignore pattern"))
    } else {
      Ok(FilterResult::process())
    }
  }
}

/// Filter that combines multiple filters.
///
/// Filters run in insertion order and the first rejection wins.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Constructs the filter chain used by the processor.
///
/// The extension check runs first so ignore patterns are only evaluated for
/// candidate sources.
///
/// # Parameters
///
/// * `extension` - Extension of the files to rewrite, without the dot
/// * `ignore_patterns` - Glob patterns for files to leave alone
pub fn create_default_filter(extension: &str, ignore_patterns: Vec<String>) -> Result<CompositeFilter> {
  let mut filter = CompositeFilter::new(vec![Box::new(ExtensionFilter::new(extension))]);

  if !ignore_patterns.is_empty() {
    filter.add_filter(Box::new(IgnoreFilter::from_patterns(ignore_patterns)?));
  }

  Ok(filter)
}

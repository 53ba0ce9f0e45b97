//! # Processor Module
//!
//! This module contains the core functionality for rewriting license headers
//! across directory trees.
//!
//! The module is organized into several submodules:
//! - [`header_scanner`] - Detection of the comment block a file starts with
//! - [`header_replacer`] - Substitution of the new header for the old one
//! - [`file_collector`] - Depth-first directory traversal
//! - [`file_io`] - File reading and crash-safe writing
//!
//! The [`Processor`] struct is the main entry point, walking the roots and
//! handling one file at a time.

pub mod file_collector;
pub mod file_io;
pub mod header_replacer;
pub mod header_scanner;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_collector::{FileCollector, display_path};
pub use file_io::{FileIO, SourceStore};
pub use header_replacer::{JoinMode, replace_header, replace_span};
pub use header_scanner::{BlockEnd, HeaderKind, HeaderSpan, scan_header};
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, FileFilter, create_default_filter};
use crate::header::CommentSyntax;
use crate::report::{FileAction, FileReport};
use crate::verbose_log;

/// What happens when a file or directory cannot be read or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Abort the run on the first I/O error
  #[default]
  FailFast,
  /// Record the failure, continue with the next file and report at the end
  KeepGoing,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// The formatted header installed in every file
  pub header: String,
  /// Extension of the files to rewrite, without the leading dot
  pub extension: String,

  // Behavior flags
  pub check_only: bool,
  pub join_mode: JoinMode,
  pub failure_policy: FailurePolicy,

  // Optional components
  pub ignore_patterns: Vec<String>,
  pub diff_manager: Option<DiffManager>,
  pub store: Option<Box<dyn SourceStore>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(header, "swift")
  /// }
  /// ```
  pub fn new(header: impl Into<String>, extension: impl Into<String>) -> Self {
    Self {
      header: header.into(),
      extension: extension.into(),
      check_only: false,
      join_mode: JoinMode::default(),
      failure_policy: FailurePolicy::default(),
      ignore_patterns: Vec::new(),
      diff_manager: None,
      store: None,
    }
  }
}

/// Processor for rewriting license headers.
///
/// The `Processor` is responsible for:
/// - Walking each root depth-first
/// - Selecting files by extension and ignore patterns
/// - Replacing existing header blocks, or only reporting them in check mode
/// - Showing diffs of the changes
/// - Collecting report data about processed files
pub struct Processor {
  /// The formatted header
  header: String,

  /// Comment syntax used to recognise existing headers
  syntax: CommentSyntax,

  /// How the header is joined to the body
  join_mode: JoinMode,

  /// Whether to only report outdated headers without modifying files
  check_only: bool,

  /// Whether I/O errors abort the run
  failure_policy: FailurePolicy,

  /// Filter deciding which walked files are candidates
  file_filter: CompositeFilter,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,

  /// Where file contents are read from and written to
  store: Box<dyn SourceStore>,

  /// File collector for directory traversal
  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_filter = create_default_filter(&config.extension, config.ignore_patterns)?;

    Ok(Self {
      header: config.header,
      syntax: CommentSyntax::C_LIKE,
      join_mode: config.join_mode,
      check_only: config.check_only,
      failure_policy: config.failure_policy,
      file_filter,
      diff_manager: config.diff_manager.unwrap_or_default(),
      store: config.store.unwrap_or_else(|| Box::new(FileIO)),
      file_collector: FileCollector::new(),
    })
  }

  /// Processes every candidate file below the given roots.
  ///
  /// Roots are handled in order and files strictly one at a time. Files
  /// rejected by the filter are never read.
  ///
  /// # Returns
  ///
  /// One report per candidate file, in visiting order.
  ///
  /// # Errors
  ///
  /// With [`FailurePolicy::FailFast`], the first traversal or file I/O error
  /// is returned. With [`FailurePolicy::KeepGoing`], errors are recorded as
  /// [`FileAction::Failed`] reports instead.
  pub fn process(&self, roots: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();

    for root in roots {
      debug!("Processing root: {}", root.display());

      for entry in self.file_collector.walk(root) {
        let path = match entry {
          Ok(path) => path,
          Err(e) => {
            self.handle_failure(root, e, &mut reports)?;
            continue;
          }
        };

        let filter_result = self.file_filter.should_process(&path)?;
        if !filter_result.should_process {
          trace!(
            "Skipping {}: {}",
            path.display(),
            filter_result.reason.as_deref().unwrap_or("filtered")
          );
          continue;
        }

        match self.process_file(&path) {
          Ok(action) => reports.push(FileReport::new(path, action)),
          Err(e) => self.handle_failure(&path, e, &mut reports)?,
        }
      }
    }

    Ok(reports)
  }

  fn handle_failure(&self, path: &Path, error: anyhow::Error, reports: &mut Vec<FileReport>) -> Result<()> {
    match self.failure_policy {
      FailurePolicy::FailFast => Err(error),
      FailurePolicy::KeepGoing => {
        warn!("{:#}", error);
        reports.push(FileReport::failed(path, &error));
        Ok(())
      }
    }
  }

  /// Rewrites the header of a single file.
  ///
  /// # Returns
  ///
  /// The action taken on the file.
  pub fn process_file(&self, path: &Path) -> Result<FileAction> {
    verbose_log!("Processing file: {}", path.display());

    let content = self.store.read(path)?;

    let Some(span) = scan_header(&content, &self.syntax, self.join_mode.block_end()) else {
      debug!("No header block found in {}", path.display());
      return Ok(FileAction::NoHeader);
    };
    debug!(
      "Found {} header of {} bytes in {}",
      match span.kind {
        HeaderKind::LineRun => "line comment",
        HeaderKind::Block => "block comment",
      },
      span.comment_end,
      path.display()
    );

    let updated = replace_span(&self.header, &content, &span, self.join_mode);

    if updated == content {
      trace!("Header already current in {}", path.display());
      return Ok(FileAction::Current);
    }

    self.diff_manager.display_diff(path, &content, &updated)?;

    if self.check_only {
      return Ok(FileAction::Outdated);
    }

    self
      .store
      .write(path, &updated)
      .with_context(|| format!("Failed to update header in {}", path.display()))?;
    verbose_log!("Header replaced in: {}", path.display());

    Ok(FileAction::Replaced)
  }
}

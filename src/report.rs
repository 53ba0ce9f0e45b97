//! # Report Module
//!
//! This module provides functionality for generating reports of a header
//! rewriting run in machine-readable formats (JSON, CSV).
//!
//! It captures what happened to each file that matched the extension filter
//! and can write this information in the requested format.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file, as walked
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Error message when the file could not be processed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  /// Creates a report for a file that was processed without error.
  pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
    Self {
      path: path.into(),
      action,
      error: None,
    }
  }

  /// Creates a report for a file that could not be processed.
  pub fn failed(path: impl Into<PathBuf>, error: &anyhow::Error) -> Self {
    Self {
      path: path.into(),
      action: FileAction::Failed,
      error: Some(format!("{error:#}")),
    }
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAction {
  /// The old header was replaced and the file rewritten
  Replaced,
  /// The header differs from the license (check mode, file untouched)
  Outdated,
  /// The header already matches the license
  Current,
  /// The file does not start with a comment block and was left alone
  NoHeader,
  /// The file could not be read or written
  Failed,
}

impl FileAction {
  /// Short label used in CSV output.
  pub const fn as_str(self) -> &'static str {
    match self {
      FileAction::Replaced => "replaced",
      FileAction::Outdated => "outdated",
      FileAction::Current => "current",
      FileAction::NoHeader => "no-header",
      FileAction::Failed => "failed",
    }
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Number of files that matched the extension filter
  pub total_files: usize,
  /// Number of files whose header was replaced
  pub replaced: usize,
  /// Number of files whose header differs from the license (check mode)
  pub outdated: usize,
  /// Number of files whose header was already current
  pub current: usize,
  /// Number of files without a leading comment block
  pub no_header: usize,
  /// Number of files that could not be processed
  pub failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the summary was created
  pub timestamp: i64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let count = |action: FileAction| files.iter().filter(|f| f.action == action).count();

    Self {
      total_files: files.len(),
      replaced: count(FileAction::Replaced),
      outdated: count(FileAction::Outdated),
      current: count(FileAction::Current),
      no_header: count(FileAction::NoHeader),
      failed: count(FileAction::Failed),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Local::now().timestamp(),
    }
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Generator for reports in the supported formats
pub struct ReportGenerator {
  format: ReportFormat,
  output_path: PathBuf,
}

impl ReportGenerator {
  /// Creates a generator writing `format` to `output_path`.
  pub fn new(format: ReportFormat, output_path: impl Into<PathBuf>) -> Self {
    Self {
      format,
      output_path: output_path.into(),
    }
  }

  /// Renders the report and writes it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = self.render(files, summary)?;

    fs::write(&self.output_path, content).with_context(|| {
      format!(
        "Failed to write {} report to {}",
        self.format,
        self.output_path.display()
      )
    })
  }

  /// Renders the report content without writing it.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => Self::generate_json(files, summary),
      ReportFormat::Csv => Ok(Self::generate_csv(files, summary)),
    }
  }

  fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { summary, files }).with_context(|| "Failed to serialize JSON report")
  }

  fn generate_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
    let mut csv = String::from("path,action,error\n");

    for file in files {
      let path = csv_field(&file.path.to_string_lossy());
      let error = csv_field(file.error.as_deref().unwrap_or(""));
      csv.push_str(&format!("{},{},{}\n", path, file.action.as_str(), error));
    }

    // Add summary at the end
    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Total files,{}\n", summary.total_files));
    csv.push_str(&format!("Headers replaced,{}\n", summary.replaced));
    csv.push_str(&format!("Headers outdated,{}\n", summary.outdated));
    csv.push_str(&format!("Headers current,{}\n", summary.current));
    csv.push_str(&format!("Files without header,{}\n", summary.no_header));
    csv.push_str(&format!("Files failed,{}\n", summary.failed));
    csv.push_str(&format!("Processing time (seconds),{:.2}\n", summary.processing_time_secs));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    csv
  }
}

/// Quotes a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}

//! # Output Module
//!
//! This module centralizes all user-facing output for the reheader tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Default output lists the files that changed or need attention
//! - `-v` lists every file, `-q` prints only paths for scripting
//! - stdout stays predictable for piping; diagnostics go to stderr

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::display_path;
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header outdated
  pub const OUTDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Reports grouped by the action taken.
#[derive(Debug, Default)]
pub struct CategorizedReports<'a> {
  pub replaced: Vec<&'a FileReport>,
  pub outdated: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Groups the reports that need to be listed to the user.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self::default();
    for report in reports {
      match report.action {
        FileAction::Replaced => categorized.replaced.push(report),
        FileAction::Outdated => categorized.outdated.push(report),
        FileAction::Failed => categorized.failed.push(report),
        FileAction::Current | FileAction::NoHeader => {}
      }
    }
    categorized
  }
}

/// Print the initial message naming the roots being walked.
pub fn print_start_message(roots: &[std::path::PathBuf], extension: &str, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Updating" } else { "Checking" };
  let roots = roots
    .iter()
    .map(|root| root.display().to_string())
    .collect::<Vec<_>>()
    .join(", ");

  println!("{} .{} headers in {}...", verb, extension, roots);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

fn files_word(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Prints a titled list of files, truncated unless verbose.
///
/// In quiet mode only the paths are printed so the output can be piped.
fn print_file_list(title: &str, files: &[&FileReport], base: Option<&Path>, with_errors: bool) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", display_path(&file.path, base));
    }
    return;
  }

  println!("{}", title);

  let show_all = is_verbose();
  let limit = if show_all { files.len() } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    let path = display_path(&file.path, base);
    match (&file.error, with_errors) {
      (Some(error), true) => println!(
        "  {}: {}",
        path,
        error.if_supports_color(Stream::Stdout, |e| e.dimmed())
      ),
      _ => println!("  {}", path),
    }
  }

  if files.len() > limit {
    println!("  ... and {} more (use -v to see all)", files.len() - limit);
  }
}

/// Print the list of files whose header was replaced.
pub fn print_replaced_files(files: &[&FileReport], base: Option<&Path>) {
  if is_quiet() {
    return;
  }

  let title = format!(
    "{} Replaced header in {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    files.len(),
    files_word(files.len())
  );
  print_file_list(&title, files, base, false);
}

/// Print the list of files whose header differs from the license.
pub fn print_outdated_files(files: &[&FileReport], base: Option<&Path>) {
  let title = format!(
    "{} {} {} with outdated header:",
    symbols::OUTDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    files.len(),
    files_word(files.len())
  );
  print_file_list(&title, files, base, false);
}

/// Print the list of files that could not be processed.
pub fn print_failed_files(files: &[&FileReport], base: Option<&Path>) {
  let title = format!(
    "{} {} {} could not be processed:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    files.len(),
    files_word(files.len())
  );
  print_file_list(&title, files, base, true);
}

/// Print the message shown when nothing needed to change.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All headers are up to date",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the one-line summary of the run.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let mut parts = Vec::new();
  if check_only {
    parts.push(format!("{} outdated", summary.outdated));
  } else {
    parts.push(format!("{} replaced", summary.replaced));
  }
  parts.push(format!("{} current", summary.current));
  parts.push(format!("{} without header", summary.no_header));
  if summary.failed > 0 {
    parts.push(format!("{} failed", summary.failed));
  }

  println!(
    "{} {} in {:.2}s ({})",
    summary.total_files,
    files_word(summary.total_files),
    summary.processing_time.as_secs_f64(),
    parts.join(", ")
  );
}

/// Print a hint about what to run next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!(
    "{} {}",
    "hint:".if_supports_color(Stream::Stdout, |s| s.cyan()),
    message
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_categorize_reports() {
    let reports = vec![
      FileReport::new("a.swift", FileAction::Replaced),
      FileReport::new("b.swift", FileAction::Outdated),
      FileReport::new("c.swift", FileAction::Current),
      FileReport::new("d.swift", FileAction::NoHeader),
      FileReport::failed("e.swift", &anyhow::anyhow!("denied")),
      FileReport::new("f.swift", FileAction::Replaced),
    ];

    let categorized = CategorizedReports::from_reports(&reports);
    assert_eq!(categorized.replaced.len(), 2);
    assert_eq!(categorized.outdated.len(), 1);
    assert_eq!(categorized.failed.len(), 1);
    assert_eq!(categorized.failed[0].path, Path::new("e.swift"));
  }

  #[test]
  fn test_files_word() {
    assert_eq!(files_word(1), "file");
    assert_eq!(files_word(0), "files");
    assert_eq!(files_word(2), "files");
  }
}

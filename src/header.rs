//! # Header Module
//!
//! This module turns raw license text into the comment block that gets
//! installed at the top of every processed file.
//!
//! The module includes:
//! - [`CommentSyntax`] describing the comment markers of the target language
//! - [`load_license`] for reading the license text once per run
//! - [`format_header`] for prefixing the license text with line-comment markers
//!
//! ## Example
//!
//! ```rust
//! use reheader::header::{CommentSyntax, format_header};
//!
//! let header = format_header("Copyright ACME\n\nAll rights reserved.\n", &CommentSyntax::C_LIKE);
//! assert_eq!(header, "// Copyright ACME\n//\n// All rights reserved.\n//");
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// Comment markers of the language whose files are being rewritten.
///
/// Headers are always written with the line marker. The block markers are only
/// used to recognise an existing header that was written as a single block
/// comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
  /// Marker that starts a single-line comment (e.g. "//")
  pub line: &'static str,

  /// Marker that opens a block comment (e.g. "/*")
  pub block_open: &'static str,

  /// Marker that closes a block comment (e.g. "*/")
  pub block_close: &'static str,
}

impl CommentSyntax {
  /// C-family syntax shared by Swift, Rust, Go, Java and friends.
  pub const C_LIKE: Self = Self {
    line: "//",
    block_open: "/*",
    block_close: "*/",
  };
}

impl Default for CommentSyntax {
  fn default() -> Self {
    Self::C_LIKE
  }
}

/// Reads the license text that will be turned into the header.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not
/// valid UTF-8.
pub fn load_license(path: &Path) -> Result<String> {
  verbose_log!("Loading license from: {}", path.display());

  let license =
    fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;

  verbose_log!("License content:\n{}", license);

  Ok(license)
}

/// Formats license text as a line-comment block.
///
/// The text is copied character by character so that line terminators are
/// preserved exactly. Every newline is followed by a bare comment marker, and
/// the marker only gets a trailing space when the next line is non-empty.
/// Text that ends with a newline therefore ends with a bare marker.
///
/// # Parameters
///
/// * `license_text` - The raw license text
/// * `syntax` - Comment syntax providing the line marker
///
/// # Returns
///
/// The formatted header, without a trailing newline.
pub fn format_header(license_text: &str, syntax: &CommentSyntax) -> String {
  let mut header = String::with_capacity(license_text.len() + 8 * (license_text.lines().count() + 1));
  header.push_str(syntax.line);
  header.push(' ');

  let mut chars = license_text.chars().peekable();
  while let Some(c) = chars.next() {
    header.push(c);
    if c == '\n' {
      header.push_str(syntax.line);
      if chars.peek().is_some_and(|&next| next != '\n') {
        header.push(' ');
      }
    }
  }

  header
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  fn format(text: &str) -> String {
    format_header(text, &CommentSyntax::C_LIKE)
  }

  #[test]
  fn test_format_two_lines() {
    assert_eq!(format("A\nB\n"), "// A\n// B\n//");
  }

  #[test]
  fn test_format_empty_text() {
    assert_eq!(format(""), "// ");
  }

  #[test]
  fn test_format_unterminated_last_line() {
    assert_eq!(format("A\nB"), "// A\n// B");
  }

  #[test]
  fn test_format_blank_lines_have_no_trailing_space() {
    assert_eq!(
      format("Copyright\n\nPermission is granted\n"),
      "// Copyright\n//\n// Permission is granted\n//"
    );
  }

  #[test]
  fn test_format_consecutive_blank_lines() {
    assert_eq!(format("A\n\n\nB\n"), "// A\n//\n//\n// B\n//");
  }

  #[test]
  fn test_format_keeps_carriage_returns() {
    // '\r' is not a newline, so the line after it still gets a space
    assert_eq!(format("A\r\n\r\nB"), "// A\r\n// \r\n// B");
  }

  #[test]
  fn test_format_line_count_matches_license() {
    let license = "The MIT License (MIT)\n\nCopyright (c) 2016 Polidea\n\nPermission is hereby granted\n";
    let header = format(license);

    let license_lines: Vec<&str> = license.split('\n').collect();
    let header_lines: Vec<&str> = header.split('\n').collect();
    assert_eq!(license_lines.len(), header_lines.len());

    for (original, commented) in license_lines.iter().zip(&header_lines) {
      let stripped = commented.strip_prefix("//").expect("every line starts with the marker");
      assert_eq!(stripped.trim_start_matches(' '), *original);
    }
  }

  #[test]
  fn test_load_license() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("LICENSE");
    fs::write(&path, "Copyright (c) Test\n").expect("write license");

    assert_eq!(load_license(&path).expect("license loads"), "Copyright (c) Test\n");
  }

  #[test]
  fn test_load_license_missing_file() {
    let dir = tempdir().expect("tempdir");
    let err = load_license(&dir.path().join("LICENSE")).expect_err("missing license must fail");
    assert!(err.to_string().contains("Failed to read license file"));
  }
}

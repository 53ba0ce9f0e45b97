//! # Header Replacer Module
//!
//! Substitutes a freshly formatted header for the header block a file already
//! starts with.

use clap::ValueEnum;
use serde::Deserialize;

use super::header_scanner::{BlockEnd, HeaderSpan, scan_header};
use crate::header::CommentSyntax;

/// How the new header is joined to the body that follows the old one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
  /// Keep the body starting one character before the end of the old header
  /// span, matching files produced by earlier runs byte for byte. A block
  /// header ends at the last close marker.
  #[default]
  Legacy,
  /// Header, exactly one blank line, then the body. A block header ends at
  /// its first close marker.
  Clean,
}

impl JoinMode {
  /// The block comment end used when detecting the old header.
  pub const fn block_end(self) -> BlockEnd {
    match self {
      JoinMode::Legacy => BlockEnd::Last,
      JoinMode::Clean => BlockEnd::First,
    }
  }
}

impl std::fmt::Display for JoinMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      JoinMode::Legacy => write!(f, "legacy"),
      JoinMode::Clean => write!(f, "clean"),
    }
  }
}

/// Replaces the leading header block of `content` with `header`.
///
/// # Parameters
///
/// * `header` - The formatted header, usually without a trailing newline
/// * `content` - Full content of the target file
/// * `syntax` - Comment syntax used to recognise the old header
/// * `join` - How the header is joined to the remaining content
///
/// # Returns
///
/// The rewritten content, or `None` when the content does not start with a
/// recognised header block and must be left untouched. The returned content
/// may equal the input when the header is already current.
pub fn replace_header(header: &str, content: &str, syntax: &CommentSyntax, join: JoinMode) -> Option<String> {
  let span = scan_header(content, syntax, join.block_end())?;
  Some(replace_span(header, content, &span, join))
}

/// Replaces an already detected header span of `content` with `header`.
///
/// `span` must come from [`scan_header`] run on the same content.
pub fn replace_span(header: &str, content: &str, span: &HeaderSpan, join: JoinMode) -> String {
  match join {
    JoinMode::Legacy => {
      // The span is never empty, so there is always a character to step back over
      let last_len = content[..span.end].chars().next_back().map_or(0, char::len_utf8);
      let body = &content[span.end - last_len..];
      let mut out = String::with_capacity(header.len() + 1 + body.len());
      out.push_str(header);
      out.push('\n');
      out.push_str(body);
      out
    }
    JoinMode::Clean => {
      let body = &content[span.end..];
      if body.is_empty() {
        format!("{header}\n")
      } else {
        format!("{header}\n\n{body}")
      }
    }
  }
}

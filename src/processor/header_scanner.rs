//! # Header Scanner Module
//!
//! Detects the comment block a file starts with. Two shapes are recognised,
//! tried in order at the very start of the content:
//!
//! 1. a run of consecutive lines that each start with the line marker and end
//!    with a newline,
//! 2. a single block comment with a non-empty body, closed by the last or the
//!    first close marker depending on [`BlockEnd`].
//!
//! Whitespace following the block is part of the span. Both scans are linear
//! and never backtrack.

use crate::header::CommentSyntax;

/// Which shape of header block was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
  /// One or more consecutive line comments
  LineRun,
  /// A single block comment
  Block,
}

/// Which close marker ends a leading block comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockEnd {
  /// The last close marker in the content, as files were rewritten by earlier
  /// runs. Code between an early block header and a later block comment is
  /// part of the header.
  #[default]
  Last,
  /// The first close marker after the opening one
  First,
}

/// Location of the header block at the start of a file.
///
/// Offsets are byte offsets into the scanned content and always fall on
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
  /// Shape of the detected block
  pub kind: HeaderKind,
  /// End of the comment itself, before any trailing whitespace
  pub comment_end: usize,
  /// End of the span, including trailing whitespace
  pub end: usize,
}

/// Finds the header block at the start of `content`.
///
/// Returns `None` when the content starts with neither a terminated
/// line-comment run nor a block comment.
pub fn scan_header(content: &str, syntax: &CommentSyntax, block_end: BlockEnd) -> Option<HeaderSpan> {
  let (kind, comment_end) = match scan_line_run(content, syntax.line) {
    Some(end) => (HeaderKind::LineRun, end),
    None => (
      HeaderKind::Block,
      scan_block(content, syntax.block_open, syntax.block_close, block_end)?,
    ),
  };

  Some(HeaderSpan {
    kind,
    comment_end,
    end: skip_whitespace(content, comment_end),
  })
}

/// Returns the end of the maximal run of newline-terminated line comments.
fn scan_line_run(content: &str, marker: &str) -> Option<usize> {
  let mut pos = 0;
  while content[pos..].starts_with(marker) {
    match content[pos..].find('\n') {
      Some(newline) => pos += newline + 1,
      // A trailing comment line without a newline does not extend the run
      None => break,
    }
  }

  (pos > 0).then_some(pos)
}

/// Returns the end of a leading block comment.
///
/// The body must hold at least one character, so the close marker is only
/// searched for after the first body character.
fn scan_block(content: &str, open: &str, close: &str, block_end: BlockEnd) -> Option<usize> {
  let body = content.strip_prefix(open)?;
  let first = body.chars().next()?;
  let search_from = open.len() + first.len_utf8();

  let rest = &content[search_from..];
  let offset = match block_end {
    BlockEnd::Last => rest.rfind(close),
    BlockEnd::First => rest.find(close),
  }?;

  Some(search_from + offset + close.len())
}

fn skip_whitespace(content: &str, from: usize) -> usize {
  content[from..]
    .char_indices()
    .find(|&(_, c)| !is_header_whitespace(c))
    .map_or(content.len(), |(offset, _)| from + offset)
}

/// Whitespace consumed after a header block.
///
/// Covers the Unicode whitespace set plus the ASCII information separators
/// U+001C..=U+001F, which legacy tooling treated as whitespace too.
pub fn is_header_whitespace(c: char) -> bool {
  c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scan(content: &str) -> Option<HeaderSpan> {
    scan_header(content, &CommentSyntax::C_LIKE, BlockEnd::First)
  }

  fn scan_to_last(content: &str) -> Option<HeaderSpan> {
    scan_header(content, &CommentSyntax::C_LIKE, BlockEnd::Last)
  }

  #[test]
  fn test_line_run_with_blank_line() {
    let content = "// old line 1\n// old line 2\n\nimport X\n";
    let span = scan(content).expect("line run should match");

    assert_eq!(span.kind, HeaderKind::LineRun);
    assert_eq!(&content[..span.comment_end], "// old line 1\n// old line 2\n");
    assert_eq!(&content[span.end..], "import X\n");
  }

  #[test]
  fn test_line_run_stops_at_code() {
    let content = "// header\nimport X\n// not header\n";
    let span = scan(content).expect("line run should match");

    assert_eq!(span.comment_end, "// header\n".len());
    assert_eq!(span.end, span.comment_end);
  }

  #[test]
  fn test_line_run_stops_at_blank_line() {
    let content = "// first\n\n// second\ncode";
    let span = scan(content).expect("line run should match");

    assert_eq!(&content[span.end..], "// second\ncode");
  }

  #[test]
  fn test_unterminated_comment_line_is_not_part_of_run() {
    let content = "// a\n// b";
    let span = scan(content).expect("first line should match");
    assert_eq!(span.end, "// a\n".len());

    assert_eq!(scan("// only"), None);
  }

  #[test]
  fn test_no_header() {
    assert_eq!(scan("import Foundation\n"), None);
    assert_eq!(scan(""), None);
    assert_eq!(scan("\n// late comment\n"), None);
    assert_eq!(scan(" // indented\n"), None);
  }

  #[test]
  fn test_block_comment() {
    let content = "/* old */\n\nbody";
    let span = scan(content).expect("block should match");

    assert_eq!(span.kind, HeaderKind::Block);
    assert_eq!(span.comment_end, "/* old */".len());
    assert_eq!(&content[span.end..], "body");
  }

  #[test]
  fn test_block_comment_spans_lines() {
    let content = "/*\n * Copyright\n */\nimport UIKit\n";
    let span = scan(content).expect("block should match");

    assert_eq!(&content[span.end..], "import UIKit\n");
  }

  #[test]
  fn test_block_comment_ends_at_first_close() {
    let content = "/* a */\ncode()\n/* b */\n";
    let span = scan(content).expect("block should match");

    assert_eq!(&content[span.end..], "code()\n/* b */\n");
  }

  #[test]
  fn test_block_comment_ends_at_last_close() {
    let content = "/* a */\ncode()\n/* b */\nmore()\n";
    let span = scan_to_last(content).expect("block should match");

    assert_eq!(span.kind, HeaderKind::Block);
    assert_eq!(span.comment_end, "/* a */\ncode()\n/* b */".len());
    assert_eq!(&content[span.end..], "more()\n");

    // Block ends only matter for block headers
    let content = "// a\n/* b */\ncode";
    assert_eq!(scan_to_last(content), scan(content));
  }

  #[test]
  fn test_last_close_needs_body() {
    assert_eq!(scan_to_last("/**/\ncode"), None);
    assert_eq!(scan_to_last("/*/"), None);

    let content = "/**/ x */\ncode";
    let span = scan_to_last(content).expect("later close should match");
    assert_eq!(&content[span.end..], "code");
  }

  #[test]
  fn test_block_comment_needs_body() {
    assert_eq!(scan("/**/\ncode"), None);

    // The first close overlaps the body character, so a later one is used
    let content = "/**/ x */\ncode";
    let span = scan(content).expect("later close should match");
    assert_eq!(&content[span.end..], "code");
  }

  #[test]
  fn test_unclosed_block_comment() {
    assert_eq!(scan("/* never closed\ncode\n"), None);
    assert_eq!(scan("/*"), None);
  }

  #[test]
  fn test_line_run_takes_precedence_over_block() {
    let content = "// line\n/* block */\ncode";
    let span = scan(content).expect("line run should match");

    assert_eq!(span.kind, HeaderKind::LineRun);
    assert_eq!(&content[span.end..], "/* block */\ncode");
  }

  #[test]
  fn test_trailing_whitespace_to_end_of_file() {
    let content = "// only a header\n\n  \t\n";
    let span = scan(content).expect("line run should match");

    assert_eq!(span.end, content.len());
  }

  #[test]
  fn test_multibyte_content() {
    let content = "// © Zürich\n\u{3000}\nlet π = 3\n";
    let span = scan(content).expect("line run should match");

    assert_eq!(&content[span.end..], "let π = 3\n");

    let block = "/*é*/ok";
    let span = scan(block).expect("block with multibyte body should match");
    assert_eq!(&block[span.end..], "ok");
  }

  #[test]
  fn test_header_whitespace_set() {
    assert!(is_header_whitespace(' '));
    assert!(is_header_whitespace('\u{0b}'));
    assert!(is_header_whitespace('\u{1c}'));
    assert!(is_header_whitespace('\u{85}'));
    assert!(!is_header_whitespace('/'));
    assert!(!is_header_whitespace('\u{200b}'));
  }
}

//! # reheader
//!
//! A tool that rewrites the license header at the top of source files across
//! directory trees.
//!
//! `reheader` reads a license text once, turns it into a line-comment block
//! and, for every file with the configured extension, replaces the comment
//! block the file starts with. Everything after that block is left untouched,
//! and files that do not start with a comment block are skipped.
//!
//! ## Features
//!
//! * Recognises existing headers written as a run of `//` lines or as a single
//!   `/* ... */` block
//! * Byte-compatible join with files produced by earlier runs, or a clean
//!   "header, blank line, body" join
//! * Check-only mode with diffs to see what would change
//! * Crash-safe writes through a temporary file and rename
//! * Fail-fast by default, or best-effort with a summary of failures
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use reheader::header::{CommentSyntax, format_header, load_license};
//! use reheader::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!   let license = load_license(std::path::Path::new("LICENSE"))?;
//!   let header = format_header(&license, &CommentSyntax::C_LIKE);
//!
//!   let processor = Processor::new(ProcessorConfig::new(header, "swift"))?;
//!   let reports = processor.process(&[PathBuf::from("Source"), PathBuf::from("Tests")])?;
//!
//!   println!("Processed {} files", reports.len());
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - License loading and header formatting
//! * [`processor`] - Header detection, replacement and the per-file driver
//! * [`config`] - Configuration file and settings resolution
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`header`]: crate::header
//! [`processor`]: crate::processor
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod cli;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;

//! # Logging Module
//!
//! Two channels of output exist besides the `tracing` diagnostics set up by
//! [`init_tracing`]:
//!
//! - [`verbose_log!`] lines on stderr, only after `-v` turned verbose mode on,
//!   for per-file progress such as which header file was loaded
//! - [`info_log!`] lines on stdout, dropped with `-q`, for notes like the
//!   location of a written report
//!
//! The output mode and color choice are process-wide and set once by the CLI.
//!
//! ```rust
//! use reheader::logging::{ColorMode, set_verbose};
//! use reheader::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Rewriting header of {}", "Peripheral.swift");
//! info_log!("Generated JSON report at {}", "headers.json");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Prints to stderr when verbose mode is on.
///
/// Takes [`eprintln!`] arguments.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints to stdout, highlighted, unless quiet mode is on.
///
/// Takes [`println!`] arguments.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Writes an already formatted [`info_log!`] line, in yellow when stdout
/// supports colors.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

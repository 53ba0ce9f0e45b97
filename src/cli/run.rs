//! # Run Command
//!
//! This module implements the header rewriting command: it resolves the
//! settings, formats the license once and drives the processor over every
//! root.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, Settings, load_config};
use crate::diff::DiffManager;
use crate::header::{CommentSyntax, format_header, load_license};
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_failed_files, print_hint, print_outdated_files,
  print_replaced_files, print_start_message, print_summary,
};
use crate::processor::{FailurePolicy, JoinMode, Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, ReportFormat, ReportGenerator};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Directory trees to process (default: from config, else RxBluetoothKit
  /// and RxBluetoothKitTests)
  #[arg(value_name = "ROOTS")]
  pub roots: Vec<PathBuf>,

  /// License text to install as the header [default: LICENSE]
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Extension of the files to rewrite, without the dot [default: swift]
  #[arg(long, short = 'e', value_name = "EXT")]
  pub extension: Option<String>,

  /// Only report files whose header is outdated, without modifying them
  #[arg(long)]
  pub check: bool,

  /// Show a diff of every header change on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save a diff of every header change to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// How the new header is joined to the file body; `clean` also ends a block
  /// header at its first `*/` [default: legacy]
  #[arg(long, value_enum, value_name = "MODE")]
  pub join: Option<JoinMode>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "PATTERN")]
  pub ignore: Vec<String>,

  /// Continue past files that cannot be read or written and report them at
  /// the end
  #[arg(long)]
  pub keep_going: bool,

  /// Path to config file (default: .reheader.toml in the current directory)
  #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the paths needing attention
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the header rewriting command with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and the logging macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;

  let settings = Settings::resolve(
    config,
    CliOverrides {
      license_file: args.license_file,
      roots: args.roots,
      extension: args.extension,
      join: args.join,
      ignore: args.ignore,
    },
  )?;
  debug!("Resolved settings: {:?}", settings);

  let license = load_license(&settings.license_file)?;
  let header = format_header(&license, &CommentSyntax::C_LIKE);

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    check_only: args.check,
    join_mode: settings.join,
    failure_policy: if args.keep_going {
      FailurePolicy::KeepGoing
    } else {
      FailurePolicy::FailFast
    },
    ignore_patterns: settings.ignore.clone(),
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(header, settings.extension.clone())
  })?;

  print_start_message(&settings.roots, &settings.extension, !args.check);

  let start_time = Instant::now();
  let file_reports = processor.process(&settings.roots)?;
  let summary = ProcessingSummary::from_reports(&file_reports, start_time.elapsed());
  let categorized = CategorizedReports::from_reports(&file_reports);

  print_blank_line();

  let base = Some(current_dir.as_path());
  if categorized.replaced.is_empty() && categorized.outdated.is_empty() && categorized.failed.is_empty() {
    print_all_files_ok();
  } else {
    print_replaced_files(&categorized.replaced, base);
    print_outdated_files(&categorized.outdated, base);
    if !categorized.failed.is_empty() {
      if !categorized.replaced.is_empty() || !categorized.outdated.is_empty() {
        print_blank_line();
      }
      print_failed_files(&categorized.failed, base);
    }
  }

  print_blank_line();
  print_summary(&summary, args.check);

  if args.check && !categorized.outdated.is_empty() {
    print_blank_line();
    print_hint("Run without --check to replace the outdated headers.");
  }

  for (format, output_path) in [
    (ReportFormat::Json, &args.report_json),
    (ReportFormat::Csv, &args.report_csv),
  ] {
    if let Some(output_path) = output_path {
      ReportGenerator::new(format, output_path).generate(&file_reports, &summary)?;
      info_log!("Generated {} report at {}", format, output_path.display());
    }
  }

  // Exit with non-zero code if in check mode and there are issues, or if
  // any file failed while keeping going
  if !categorized.failed.is_empty() || (args.check && !categorized.outdated.is_empty()) {
    process::exit(1);
  }

  Ok(())
}

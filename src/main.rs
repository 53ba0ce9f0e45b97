//! # reheader
//!
//! A tool that rewrites the license header comment block of source files.

use anyhow::Result;
use reheader::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.args)
}

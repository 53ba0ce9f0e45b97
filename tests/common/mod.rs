#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;

/// License text used by the tests.
pub const LICENSE_TEXT: &str = "Copyright (c) Test Company\nAll rights reserved.\n";

/// The header produced from [`LICENSE_TEXT`].
pub const FORMATTED_HEADER: &str = "// Copyright (c) Test Company\n// All rights reserved.\n//";

/// Writes a file below `dir`, creating parent directories as needed.
pub fn write_file(dir: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<()> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads a file below `dir` as a string.
pub fn read_file(dir: &Path, relative: &str) -> Result<String> {
  let path = dir.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes [`LICENSE_TEXT`] to `LICENSE` in `dir`.
pub fn write_license(dir: &Path) -> Result<()> {
  write_file(dir, "LICENSE", LICENSE_TEXT)
}

/// Builds a `reheader` command running in `dir` with config discovery
/// disabled and colors off.
pub fn reheader(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("reheader")?;
  cmd
    .current_dir(dir)
    .env_remove("REHEADER_CONFIG")
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  Ok(cmd)
}

//! # Configuration Module
//!
//! This module provides configuration support for reheader: where the license
//! text lives, which trees to walk, which files to rewrite and how the new
//! header is joined to the body.
//!
//! Configuration can be specified in a `.reheader.toml` file or via the
//! `REHEADER_CONFIG` environment variable. Command-line arguments take
//! precedence over the file, and the file over the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::processor::JoinMode;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".reheader.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "REHEADER_CONFIG";

/// License file used when none is configured.
pub const DEFAULT_LICENSE_FILE: &str = "LICENSE";

/// Directory trees walked when none are configured.
pub const DEFAULT_ROOTS: [&str; 2] = ["RxBluetoothKit", "RxBluetoothKitTests"];

/// Extension of the files rewritten when none is configured.
pub const DEFAULT_EXTENSION: &str = "swift";

/// Contents of a `.reheader.toml` file.
///
/// Every key is optional; missing keys fall back to the command line or the
/// built-in defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Path of the license text, relative to the invocation directory
  pub license_file: Option<PathBuf>,

  /// Directory trees to walk
  pub roots: Option<Vec<PathBuf>>,

  /// Extension of the files to rewrite, without the leading dot
  pub extension: Option<String>,

  /// How the new header is joined to the body
  pub join: Option<JoinMode>,

  /// Glob patterns of files to leave alone
  pub ignore: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A setting has an invalid value.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or holds invalid values.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The extension is non-empty and has no leading dot
  /// - The roots list, when given, is non-empty
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref extension) = self.extension {
      validate_extension(extension)?;
    }

    if self.roots.as_ref().is_some_and(Vec::is_empty) {
      return Err(ConfigError::InvalidValue {
        key: "roots",
        message: "at least one root directory is required".to_string(),
      });
    }

    Ok(())
  }
}

fn validate_extension(extension: &str) -> Result<(), ConfigError> {
  if extension.is_empty() {
    return Err(ConfigError::InvalidValue {
      key: "extension",
      message: "extension cannot be empty".to_string(),
    });
  }

  if extension.starts_with('.') {
    return Err(ConfigError::InvalidValue {
      key: "extension",
      message: "extension should not include leading dot".to_string(),
    });
  }

  Ok(())
}

/// Settings given on the command line, which override the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub license_file: Option<PathBuf>,
  pub roots: Vec<PathBuf>,
  pub extension: Option<String>,
  pub join: Option<JoinMode>,
  pub ignore: Vec<String>,
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub license_file: PathBuf,
  pub roots: Vec<PathBuf>,
  pub extension: String,
  pub join: JoinMode,
  /// Ignore patterns from the config file followed by those from the CLI
  pub ignore: Vec<String>,
}

impl Settings {
  /// Resolves the settings for a run.
  ///
  /// Scalar settings come from the command line, then the config file, then
  /// the defaults. Ignore patterns from both sources are combined.
  pub fn resolve(config: Option<Config>, cli: CliOverrides) -> Result<Self, ConfigError> {
    let config = config.unwrap_or_default();

    let extension = cli
      .extension
      .or(config.extension)
      .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    validate_extension(&extension)?;

    let roots = if !cli.roots.is_empty() {
      cli.roots
    } else {
      config
        .roots
        .unwrap_or_else(|| DEFAULT_ROOTS.iter().map(PathBuf::from).collect())
    };

    let mut ignore = config.ignore;
    ignore.extend(cli.ignore);

    Ok(Self {
      license_file: cli
        .license_file
        .or(config.license_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LICENSE_FILE)),
      roots,
      extension,
      join: cli.join.or(config.join).unwrap_or_default(),
      ignore,
    })
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `REHEADER_CONFIG` environment variable
/// 3. `.reheader.toml` in the base directory
///
/// An explicit path is returned even if it does not exist, so that loading
/// reports the missing file instead of silently running with defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check the base directory
  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_dir` - Directory searched for `.reheader.toml`
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is used.
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, base_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "license-file = \"LICENSE.txt\"\n",
      "roots = [\"Source\", \"Tests\"]\n",
      "extension = \"swift\"\n",
      "join = \"clean\"\n",
      "ignore = [\"**/Autogenerated/**\"]\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.license_file, Some(PathBuf::from("LICENSE.txt")));
    assert_eq!(config.roots, Some(vec![PathBuf::from("Source"), PathBuf::from("Tests")]));
    assert_eq!(config.extension.as_deref(), Some("swift"));
    assert_eq!(config.join, Some(JoinMode::Clean));
    assert_eq!(config.ignore, vec!["**/Autogenerated/**".to_string()]);
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_unknown_key_is_rejected() {
    let result: Result<Config, _> = toml::from_str("extensions = \"swift\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_unknown_join_mode_is_rejected() {
    let result: Result<Config, _> = toml::from_str("join = \"fancy\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_leading_dot() {
    let config = Config {
      extension: Some(".swift".to_string()),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { key: "extension", .. }));
  }

  #[test]
  fn test_validate_empty_roots() {
    let config = Config {
      roots: Some(Vec::new()),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { key: "roots", .. }));
  }

  #[test]
  fn test_resolve_defaults() {
    let settings = Settings::resolve(None, CliOverrides::default()).expect("defaults are valid");

    assert_eq!(settings.license_file, PathBuf::from("LICENSE"));
    assert_eq!(
      settings.roots,
      vec![PathBuf::from("RxBluetoothKit"), PathBuf::from("RxBluetoothKitTests")]
    );
    assert_eq!(settings.extension, "swift");
    assert_eq!(settings.join, JoinMode::Legacy);
    assert!(settings.ignore.is_empty());
  }

  #[test]
  fn test_resolve_precedence() {
    let config = Config {
      license_file: Some(PathBuf::from("config-license")),
      roots: Some(vec![PathBuf::from("ConfigRoot")]),
      extension: Some("m".to_string()),
      join: Some(JoinMode::Clean),
      ignore: vec!["a/".to_string()],
    };
    let cli = CliOverrides {
      license_file: Some(PathBuf::from("cli-license")),
      roots: Vec::new(),
      extension: None,
      join: Some(JoinMode::Legacy),
      ignore: vec!["b/".to_string()],
    };

    let settings = Settings::resolve(Some(config), cli).expect("valid settings");

    assert_eq!(settings.license_file, PathBuf::from("cli-license"));
    assert_eq!(settings.roots, vec![PathBuf::from("ConfigRoot")]);
    assert_eq!(settings.extension, "m");
    assert_eq!(settings.join, JoinMode::Legacy);
    assert_eq!(settings.ignore, vec!["a/".to_string(), "b/".to_string()]);
  }

  #[test]
  fn test_resolve_rejects_cli_extension_with_dot() {
    let cli = CliOverrides {
      extension: Some(".swift".to_string()),
      ..CliOverrides::default()
    };

    assert!(Settings::resolve(None, cli).is_err());
  }

  #[test]
  fn test_load_config_from_base_dir() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILENAME), "extension = \"kt\"\n")?;

    let config = load_config(None, dir.path(), false)?.expect("config should be found");
    assert_eq!(config.extension.as_deref(), Some("kt"));

    assert!(load_config(None, dir.path(), true)?.is_none());
    Ok(())
  }

  #[test]
  fn test_load_config_explicit_missing_path_fails() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("missing.toml");

    let err = load_config(Some(&missing), dir.path(), false).expect_err("missing explicit config must fail");
    assert!(format!("{err:#}").contains("Failed to read config file"));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "roots = [").expect("write config");

    let err = Config::load(&path).expect_err("invalid TOML must fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
  }
}

//! TOML configuration loading
//!
//! Configuration is read once at startup. A missing default config file is not an
//! error: the caller gets `TomlConfig::default()` and reports it via `LoadedConfig::log_source`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "tweetscore";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `config.toml`
///
/// Every field is optional; unset fields fall through to command-line defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Natural-language service credential
    pub api_key: Option<String>,
    /// Tweet input file
    pub input_path: Option<PathBuf>,
    /// Base URL of the language service (e.g. `https://language.googleapis.com/v1`)
    pub endpoint: Option<String>,
    /// Language hint sent with each document
    pub language: Option<String>,
    /// Maximum number of tweet pipelines awaiting the service at once
    pub max_in_flight: Option<usize>,
    /// Print results in input order instead of completion order
    pub ordered_output: Option<bool>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Platform default config file location
///
/// Linux: `~/.config/tweetscore/config.toml`
/// macOS: `~/Library/Application Support/tweetscore/config.toml`
/// Windows: `%APPDATA%\tweetscore\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` / `TWEETSCORE_CONFIG`
    Explicit(PathBuf),
    /// Platform default location
    Default(PathBuf),
    /// No file found; built-in defaults
    Missing(Option<PathBuf>),
}

/// Parsed configuration plus its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Report the config origin; call once tracing is initialized
    pub fn log_source(&self) {
        match &self.source {
            ConfigSource::Explicit(path) | ConfigSource::Default(path) => {
                info!("Loaded config from {}", path.display());
            }
            ConfigSource::Missing(Some(path)) => {
                warn!(
                    "No config file at {}; using defaults and command-line values",
                    path.display()
                );
            }
            ConfigSource::Missing(None) => {
                warn!("Could not determine config directory; using defaults");
            }
        }
    }
}

/// Load the config file, tolerating a missing default file
///
/// An explicitly requested file must exist. The default location may be absent,
/// in which case defaults are returned. Nothing is logged here because the
/// subscriber is configured from the result.
pub fn load_or_default(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            config: load_toml_config(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(LoadedConfig {
            config: load_toml_config(&path)?,
            source: ConfigSource::Default(path),
        }),
        other => Ok(LoadedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Missing(other),
        }),
    }
}

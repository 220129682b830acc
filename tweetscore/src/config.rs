//! Startup configuration resolution
//!
//! Builds the single `Settings` value handed to the client and driver.
//! Priority: command line / environment (via clap) → TOML file → compiled default.

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tweetscore_common::config::TomlConfig;
use tweetscore_common::{Error, Result};

use crate::services::batch_driver::{BatchConfig, OutputOrder, DEFAULT_MAX_IN_FLIGHT};
use crate::services::language_client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_INPUT_PATH: &str = "tweets.json";

/// Values supplied on the command line (or their environment variables)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub input_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub max_in_flight: Option<usize>,
    /// `--ordered`; only ever forces input order on
    pub ordered: bool,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub batch: BatchConfig,
    pub input_path: PathBuf,
}

impl Settings {
    pub fn resolve(overrides: Overrides, toml_config: &TomlConfig) -> Result<Self> {
        let api_key = resolve_api_key(overrides.api_key.as_deref(), toml_config)?;

        let endpoint = overrides
            .endpoint
            .or_else(|| toml_config.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        let max_in_flight = overrides
            .max_in_flight
            .or(toml_config.max_in_flight)
            .unwrap_or(DEFAULT_MAX_IN_FLIGHT);
        if max_in_flight == 0 {
            return Err(Error::Config("max_in_flight must be at least 1".to_string()));
        }

        let timeout_secs = overrides
            .timeout_secs
            .or(toml_config.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("Request timeout must be at least 1 second".to_string()));
        }

        let order = if overrides.ordered || toml_config.ordered_output.unwrap_or(false) {
            OutputOrder::Input
        } else {
            OutputOrder::Completion
        };

        Ok(Self {
            client: ClientConfig {
                api_key,
                endpoint,
                language: overrides.language.or_else(|| toml_config.language.clone()),
                timeout: Duration::from_secs(timeout_secs),
            },
            batch: BatchConfig {
                max_in_flight,
                order,
            },
            input_path: overrides
                .input_path
                .or_else(|| toml_config.input_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
        })
    }
}

/// Resolve the service credential
///
/// **Priority:** command line / `TWEETSCORE_API_KEY` → TOML `api_key`
pub fn resolve_api_key(cli_key: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    let cli_key = cli_key.filter(|k| is_valid_key(k));
    let toml_key = toml_config.api_key.as_deref().filter(|k| is_valid_key(k));

    if cli_key.is_some() && toml_key.is_some() {
        warn!(
            "API key found in multiple sources: command line/environment, TOML. Using command line/environment (highest priority)."
        );
    }

    if let Some(key) = cli_key {
        info!("API key loaded from command line/environment");
        return Ok(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("API key loaded from TOML config");
        return Ok(key.trim().to_string());
    }

    Err(Error::Config(
        "API key not configured. Please configure using one of:\n\
         1. Command line: --api-key your-key-here\n\
         2. Environment: TWEETSCORE_API_KEY=your-key-here\n\
         3. TOML config: ~/.config/tweetscore/config.toml (api_key = \"your-key\")"
            .to_string(),
    ))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

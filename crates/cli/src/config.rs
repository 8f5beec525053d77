//! `paylens.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [remote]
//! endpoint = "https://payments.example.com/api/payment-records"
//! auth_token = "tok_..."
//! timeout_secs = 10
//!
//! [display]
//! currency_symbol = "¥"
//!
//! [log]
//! level = "warn"
//! ```
//!
//! Every key is optional. `PAYLENS_ENDPOINT` and `PAYLENS_AUTH_TOKEN`
//! override the file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use paylens_remote::{HttpConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "paylens.toml";

pub(crate) const ENDPOINT_ENV: &str = "PAYLENS_ENDPOINT";
pub(crate) const AUTH_TOKEN_ENV: &str = "PAYLENS_AUTH_TOKEN";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub remote: RemoteSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

/// `[remote]` section: where and how to reach the records store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RemoteSettings {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplaySettings {
    /// Prefixed to every amount in text output.
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: "¥".to_string(),
        }
    }
}

/// `[log]` section. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: "warn".to_string(),
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

impl Config {
    pub(crate) fn http_config(&self) -> HttpConfig {
        HttpConfig {
            endpoint: self.remote.endpoint.clone(),
            auth_token: self.remote.auth_token.clone(),
            timeout: Duration::from_secs(self.remote.timeout_secs),
        }
    }
}

/// Load configuration from `path`, or from `./paylens.toml` if it exists,
/// then apply environment overrides.
///
/// Returns a human-readable error string on failure.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let mut config = match path {
        Some(p) => read_config(p)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                read_config(default_path)?
            } else {
                Config::default()
            }
        }
    };
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub(crate) fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

fn parse_config(content: &str) -> Result<Config, String> {
    let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    if config.remote.timeout_secs == 0 {
        return Err("remote.timeout_secs must be at least 1".to_string());
    }
    Ok(config)
}

/// Empty variables are ignored.
fn apply_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
        config.remote.endpoint = endpoint;
    }
    if let Some(token) = lookup(AUTH_TOKEN_ENV).filter(|v| !v.is_empty()) {
        config.remote.auth_token = Some(token);
    }
}

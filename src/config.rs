use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001/api/external";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Orchestrator settings. Read once at start-up from the environment,
/// optionally overlaid with a TOML file, then with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub gateway_url: String,
    /// When false the gateway is never called.
    pub enabled: bool,
    pub timeout_ms: u64,
    /// Substitute the fallback analysis on gateway failure. When false the
    /// result is still complete but the outcome is reported as an error.
    pub enable_fallback: bool,
    /// Build the fallback analysis from local keyword heuristics instead of
    /// the zeroed default.
    pub heuristic_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            enabled: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            enable_fallback: true,
            heuristic_fallback: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Shape of the optional TOML overlay. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub gateway_url: Option<String>,
    pub enabled: Option<bool>,
    pub timeout_ms: Option<u64>,
    pub enable_fallback: Option<bool>,
    pub heuristic_fallback: Option<bool>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            gateway_url: lookup("AUTHORCHECK_GATEWAY_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.gateway_url),
            enabled: lookup("AUTHORCHECK_AI_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enabled),
            timeout_ms: lookup("AUTHORCHECK_AI_TIMEOUT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_ms),
            enable_fallback: lookup("AUTHORCHECK_AI_FALLBACK_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_fallback),
            heuristic_fallback: lookup("AUTHORCHECK_HEURISTIC_FALLBACK")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.heuristic_fallback),
        }
    }

    /// Overlay the keys present in a TOML file.
    pub fn with_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.with_overlay(file))
    }

    pub fn with_overlay(self, file: ConfigFile) -> Self {
        Self {
            gateway_url: file.gateway_url.unwrap_or(self.gateway_url),
            enabled: file.enabled.unwrap_or(self.enabled),
            timeout_ms: file.timeout_ms.unwrap_or(self.timeout_ms),
            enable_fallback: file.enable_fallback.unwrap_or(self.enable_fallback),
            heuristic_fallback: file.heuristic_fallback.unwrap_or(self.heuristic_fallback),
        }
    }
}

/// Only "true" (any case) switches a flag on.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

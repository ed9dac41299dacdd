//! Terminal configuration — TOML file with environment overrides.
//!
//! Looked up at `<config dir>/smarttrade/config.toml`. A missing file is not
//! an error; every field has a default. The `ALPHAVANTAGE_API_KEY`
//! environment variable overrides the `api_key` in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration shared by the TUI and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Alpha Vantage API key. The environment variable wins over this.
    pub api_key: Option<String>,
    /// Ticker shown when the terminal starts, in `EXCH:CODE` form.
    pub default_symbol: String,
    /// Dashboard refresh cadence.
    pub poll_interval_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_symbol: "BSE:RELIANCE".into(),
            poll_interval_secs: 60,
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Standard config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smarttrade")
            .join("config.toml")
    }

    /// Load from the given path. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Resolved API key: environment wins over the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(cfg.default_symbol, "BSE:RELIANCE");
        assert_eq!(cfg.poll_interval_secs, 60);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = std::env::temp_dir().join("smarttrade_config_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "default_symbol = \"NSE:TCS\"\n").unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.default_symbol, "NSE:TCS");
        assert_eq!(cfg.poll_interval_secs, 60); // default retained

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join("smarttrade_config_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "default_symbol = [not toml").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn full_file_roundtrip() {
        let cfg = AppConfig {
            api_key: Some("demo".into()),
            default_symbol: "NSE:INFY".into(),
            poll_interval_secs: 30,
            http_timeout_secs: 10,
        };
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("demo"));
        assert_eq!(parsed.poll_interval_secs, 30);
    }
}

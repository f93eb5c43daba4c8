//! Configuration management for anilink
//!
//! Settings are layered, later layers winning:
//! 1. `~/.config/anilink/config.toml` (or `--config <path>`)
//! 2. Environment variables `BOT_TOKEN` / `API_BASE_URL` (a `.env` file is
//!    loaded into the environment at startup)
//! 3. Command-line overrides
//!
//! Values are resolved once in `main` and handed to the components; nothing
//! below this module reads the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::resolve::DEFAULT_SEARCH_LIMIT;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (config file or environment)")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: Option<String>,
    /// Root URL of the content API
    pub api_base_url: Option<String>,
    /// Per-request timeout for content API calls
    pub request_timeout_secs: Option<u64>,
    /// Telegram long-poll window
    pub poll_timeout_secs: Option<u64>,
    /// Titles shown per search
    pub search_limit: Option<usize>,
}

impl Config {
    /// Get default config file path (~/.config/anilink/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("anilink").join("config.toml"))
    }

    /// Load the default config file; a missing file yields defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load an explicit config file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `BOT_TOKEN` / `API_BASE_URL` from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup; blank values are ignored
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("BOT_TOKEN") {
            self.bot_token = Some(token);
        }
        if let Some(url) = var("API_BASE_URL") {
            self.api_base_url = Some(url);
        }
        self
    }

    /// Reject settings that would make every request or search useless
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.search_limit == Some(0) {
            return Err(ConfigError::Zero("search_limit"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }
        Ok(self)
    }

    /// Content API root, without a trailing slash
    pub fn api_base_url(&self) -> Result<String, ConfigError> {
        non_blank(self.api_base_url.as_deref())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or(ConfigError::Missing("API_BASE_URL"))
    }

    pub fn bot_token(&self) -> Result<&str, ConfigError> {
        non_blank(self.bot_token.as_deref()).ok_or(ConfigError::Missing("BOT_TOKEN"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn poll_timeout_secs(&self) -> u64 {
        self.poll_timeout_secs.unwrap_or(DEFAULT_POLL_TIMEOUT_SECS)
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.bot_token.is_none());
        assert_eq!(config.search_limit(), 5);
        assert_eq!(config.poll_timeout_secs(), 30);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_values_are_errors() {
        let config = Config {
            bot_token: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.bot_token(), Err(ConfigError::Missing("BOT_TOKEN"))));
        assert!(matches!(
            config.api_base_url(),
            Err(ConfigError::Missing("API_BASE_URL"))
        ));
    }

    #[test]
    fn test_api_base_url_trims_trailing_slash() {
        let config = Config {
            api_base_url: Some("https://api.example/anime/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_base_url().unwrap(), "https://api.example/anime");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = Config {
            bot_token: Some("file-token".to_string()),
            api_base_url: Some("https://file.example".to_string()),
            ..Config::default()
        }
        .with_env_from(|key| match key {
            "BOT_TOKEN" => Some("env-token".to_string()),
            "API_BASE_URL" => Some("".to_string()),
            _ => None,
        });

        assert_eq!(config.bot_token().unwrap(), "env-token");
        // Blank env var does not clobber the file value
        assert_eq!(config.api_base_url().unwrap(), "https://file.example");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bot_token = \"123:abc\"\napi_base_url = \"http://localhost:4000/api\"\nsearch_limit = 8"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.bot_token().unwrap(), "123:abc");
        assert_eq!(config.api_base_url().unwrap(), "http://localhost:4000/api");
        assert_eq!(config.search_limit(), 8);
        assert_eq!(config.poll_timeout_secs(), 30);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_limit = \"many\"").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_limit = 0").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero("search_limit"))
        ));

        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero("request_timeout_secs"))
        ));

        // Zero poll timeout means short polling, which is valid
        let config = Config {
            poll_timeout_secs: Some(0),
            search_limit: Some(3),
            ..Config::default()
        };
        assert_eq!(config.validate().unwrap().search_limit(), 3);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from(Path::new("/nonexistent/anilink/config.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

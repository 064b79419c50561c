use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::DEFAULT_GIPHY_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Relay configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub static_dir: PathBuf,

    // Upstream
    /// Credential attached to every upstream request. May be empty.
    pub giphy_key: String,
    pub giphy_base_url: String,
    pub upstream_timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("web_host", &self.web_host)
            .field("web_port", &self.web_port)
            .field("static_dir", &self.static_dir)
            .field("giphy_key", &"<redacted>")
            .field("giphy_base_url", &self.giphy_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GIPHY_KEY` is optional: a missing key is sent upstream as an empty
    /// credential and shows up as failed requests, never as a startup error.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("PORT", 3001)?,
            static_dir: PathBuf::from(env_or_default("STATIC_DIR", "./static")),

            // Upstream
            giphy_key: std::env::var("GIPHY_KEY").unwrap_or_default(),
            giphy_base_url: env_or_default("GIPHY_BASE_URL", DEFAULT_GIPHY_BASE_URL),
            upstream_timeout: parse_env_optional_u64("UPSTREAM_TIMEOUT_SECS")?
                .map(Duration::from_secs),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream base URL does not parse or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.giphy_base_url).map_err(|e| ConfigError::InvalidValue {
            name: "GIPHY_BASE_URL".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "GIPHY_BASE_URL".to_string(),
                message: format!("unsupported scheme '{}'", base.scheme()),
            });
        }
        if self.upstream_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidValue {
                name: "UPSTREAM_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whether an upstream credential has been configured.
    #[must_use]
    pub fn has_giphy_key(&self) -> bool {
        !self.giphy_key.is_empty()
    }

    /// Configuration with defaults, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            static_dir: PathBuf::from("./static"),
            giphy_key: "test-key".to_string(),
            giphy_base_url: DEFAULT_GIPHY_BASE_URL.to_string(),
            upstream_timeout: None,
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_optional_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map(Some).map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(None),
    }
}

//! Server configuration.
//!
//! Settings come from an optional `config.toml`. The GitHub token is not
//! part of it and is supplied by the caller (CLI flag or environment).

mod error;

pub use error::ConfigError;

use crate::provider::GITHUB_API_URL;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Settings of the HTTP server and the batch service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AppConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// GitHub API endpoint (defaults to the public API).
    #[serde(default)]
    pub github_api_url: Option<String>,

    /// Maximum provider calls in flight per batch; unbounded when unset.
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Environment variable overriding `log-level`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable overriding `github-api-url`.
pub const GITHUB_API_URL_ENV: &str = "GITHUB_API_URL";

/// Label used in validation errors caused by environment overrides.
const ENV_SOURCE: &str = "<environment>";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            github_api_url: None,
            concurrency: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Loads `path` if given, otherwise starts from the defaults, then
    /// applies environment overrides.
    ///
    /// `LOG_LEVEL` replaces `log-level` and `GITHUB_API_URL` replaces
    /// `github-api-url`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`]. Overridden values are validated as well.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if config.apply_env_overrides() {
            config.validate(Path::new(ENV_SOURCE))?;
        }
        Ok(config)
    }

    /// Applies environment overrides, returning true if any was set.
    fn apply_env_overrides(&mut self) -> bool {
        let mut overridden = false;

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            debug!(level = %level, "Log level overridden from environment");
            self.log_level = Some(level);
            overridden = true;
        }

        if let Ok(url) = std::env::var(GITHUB_API_URL_ENV) {
            debug!(url = %url, "GitHub API URL overridden from environment");
            self.github_api_url = Some(url);
            overridden = true;
        }

        overridden
    }

    /// GitHub API endpoint to use.
    #[must_use]
    pub fn github_api_url(&self) -> &str {
        self.github_api_url.as_deref().unwrap_or(GITHUB_API_URL)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.host.trim().is_empty() {
            return Err(fail("host must not be empty".to_string()));
        }

        if self.port == 0 {
            return Err(fail("port must not be 0".to_string()));
        }

        if self.concurrency == Some(0) {
            return Err(fail("concurrency must be at least 1".to_string()));
        }

        if let Some(url) = &self.github_api_url {
            Url::parse(url).map_err(|e| fail(format!("github-api-url '{url}' is invalid: {e}")))?;
        }

        Ok(())
    }
}

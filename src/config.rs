//! Launcher configuration loaded from TOML.
//!
//! The configuration is built once at startup and passed by reference to
//! the commands that need it.
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default application name used in layout templates.
pub const DEFAULT_APP: &str = "godel";

/// Top-level launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Application name substituted for `{app}` in the install layout.
    pub app: String,
    /// Version used when a command does not specify one.
    pub version: Option<String>,
    /// HTTP client settings for remote package sources.
    pub http: HttpConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP.to_string(),
            version: None,
            http: HttpConfig::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Timeout for the whole request, including the body, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub use_env_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 120,
            user_agent: concat!("toolstrap/", env!("CARGO_PKG_VERSION")).to_string(),
            use_env_proxy: true,
        }
    }
}

impl LauncherConfig {
    /// Load the configuration at `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

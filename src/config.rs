use serde::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::constants::{provider, server};
use crate::error::AppError;

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_quote_base_url")]
    pub quote_base_url: String,
    #[serde(default = "default_chart_base_url")]
    pub chart_base_url: String,
    #[serde(default = "default_cookie_url")]
    pub cookie_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            quote_base_url: default_quote_base_url(),
            chart_base_url: default_chart_base_url(),
            cookie_url: default_cookie_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_watchlist_path")]
    pub watchlist_path: String,
    #[serde(default = "default_history_period")]
    pub default_history_period: String,
    /// Max quote requests in flight while building the list; 1 = sequential
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    /// Empty means any origin
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            watchlist_path: default_watchlist_path(),
            default_history_period: default_history_period(),
            fetch_concurrency: default_fetch_concurrency(),
            cors_allowed_origins: Vec::new(),
            provider: ProviderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` (or `$CONFIG_PATH`), then apply env overrides.
    /// A missing file is not an error; every key has a default.
    pub fn load() -> Result<Self, AppError> {
        let config_path =
            env::var("CONFIG_PATH").unwrap_or_else(|_| server::DEFAULT_CONFIG_PATH.to_string());

        let mut config = Self::from_file(&config_path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(addr) = env::var("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(path) = env::var("WATCHLIST_PATH") {
            self.watchlist_path = path;
        }
        if let Ok(raw) = env::var("FETCH_CONCURRENCY") {
            self.fetch_concurrency = raw
                .parse()
                .map_err(|_| format!("FETCH_CONCURRENCY must be a positive integer, got '{}'", raw))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.fetch_concurrency == 0 {
            return Err("fetch_concurrency must be at least 1".into());
        }
        if self.default_history_period.trim().is_empty() {
            return Err("default_history_period must not be empty".into());
        }
        Ok(())
    }
}

fn default_quote_base_url() -> String {
    provider::DEFAULT_QUOTE_BASE_URL.to_string()
}

fn default_chart_base_url() -> String {
    provider::DEFAULT_CHART_BASE_URL.to_string()
}

fn default_cookie_url() -> String {
    provider::DEFAULT_COOKIE_URL.to_string()
}

fn default_user_agent() -> String {
    provider::DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    provider::DEFAULT_TIMEOUT.as_secs()
}

fn default_bind_addr() -> String {
    server::DEFAULT_BIND_ADDR.to_string()
}

fn default_watchlist_path() -> String {
    server::DEFAULT_WATCHLIST_PATH.to_string()
}

fn default_history_period() -> String {
    server::DEFAULT_HISTORY_PERIOD.to_string()
}

fn default_fetch_concurrency() -> usize {
    server::DEFAULT_FETCH_CONCURRENCY
}

//! Application configuration.
//!
//! Loaded from a TOML file (explicit path, else `DNS_MANAGER_CONFIG`, else
//! built-in defaults), then selected values are overridden from the
//! environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::services::DEFAULT_PUSH_CONCURRENCY;
use dns_manager_provider::{CLOUDFLARE_API_BASE, ClientOptions};
use serde::{Deserialize, Serialize};

/// Path of the config file.
pub const CONFIG_ENV: &str = "DNS_MANAGER_CONFIG";
/// Overrides `database.path`.
pub const DB_PATH_ENV: &str = "DNS_MANAGER_DB_PATH";
/// Overrides `provider.base_url`.
pub const API_BASE_ENV: &str = "DNS_MANAGER_API_BASE";
/// Overrides `log.level`.
pub const LOG_LEVEL_ENV: &str = "DNS_MANAGER_LOG_LEVEL";

const APP_DIR: &str = "dns-manager";
const DB_FILE: &str = "dns-manager.db";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub sync: SyncConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `SQLite` file, created on first use.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(APP_DIR).join(DB_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let options = ClientOptions::default();
        Self {
            base_url: CLOUDFLARE_API_BASE.to_string(),
            connect_timeout_secs: options.connect_timeout.as_secs(),
            request_timeout_secs: options.request_timeout.as_secs(),
            max_retries: options.max_retries,
        }
    }
}

impl ProviderConfig {
    /// Client options for every Cloudflare client built by the app.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_retries: self.max_retries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Records pushed concurrently.
    pub push_concurrency: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            push_concurrency: DEFAULT_PUSH_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default filter directive, e.g. `info` or `dns_manager_core=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `CoreError::ConfigError` if the file cannot be read or parsed,
    /// or if a value is out of range.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`], reading variables through `lookup`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(format!("Invalid config: {e}")))
    }

    /// Applies the `DNS_MANAGER_*` overrides; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup(DB_PATH_ENV) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(base_url) = lookup(API_BASE_ENV) {
            self.provider.base_url = base_url;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log.level = level;
        }
    }

    /// Rejects values the services cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.provider.base_url.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "provider.base_url must not be empty".to_string(),
            ));
        }
        if self.provider.request_timeout_secs == 0 || self.provider.connect_timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "provider timeouts must be at least one second".to_string(),
            ));
        }
        if self.sync.push_concurrency == 0 {
            return Err(CoreError::ConfigError(
                "sync.push_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

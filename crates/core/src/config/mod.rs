//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ROUTEAGG_*)
//! 2. TOML config file (if ROUTEAGG_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ROUTEAGG_*)
/// 2. TOML config file (if ROUTEAGG_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the first route provider.
    ///
    /// Set via ROUTEAGG_PROVIDER_ONE_URL environment variable.
    #[serde(default)]
    pub provider_one_url: Option<String>,

    /// Base URL of the second route provider.
    ///
    /// Set via ROUTEAGG_PROVIDER_TWO_URL environment variable.
    #[serde(default)]
    pub provider_two_url: Option<String>,

    /// User-Agent string for provider requests.
    ///
    /// Set via ROUTEAGG_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Provider request timeout in milliseconds.
    ///
    /// Set via ROUTEAGG_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Seconds between sweeps of expired routes. 0 disables the sweep.
    ///
    /// Set via ROUTEAGG_PURGE_INTERVAL_SECS environment variable.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,

    /// Maximum route slots held by the cache. 0 means unbounded.
    ///
    /// Set via ROUTEAGG_ROUTE_CAPACITY environment variable.
    #[serde(default)]
    pub route_capacity: usize,
}

fn default_user_agent() -> String {
    "routeagg/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_one_url: None,
            provider_two_url: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            purge_interval_secs: default_purge_interval_secs(),
            route_capacity: 0,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Sweep interval, or `None` when sweeping is disabled.
    pub fn purge_interval(&self) -> Option<Duration> {
        (self.purge_interval_secs > 0).then(|| Duration::from_secs(self.purge_interval_secs))
    }

    /// Route store capacity, or `None` when unbounded.
    pub fn route_capacity(&self) -> Option<usize> {
        (self.route_capacity > 0).then_some(self.route_capacity)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ROUTEAGG_`
    /// 2. TOML file from `ROUTEAGG_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ROUTEAGG_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("ROUTEAGG_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that at least one provider is configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither provider URL is set.
    pub fn require_any_provider(&self) -> Result<(), ConfigError> {
        if self.provider_one_url.is_none() && self.provider_two_url.is_none() {
            return Err(ConfigError::Missing {
                field: "provider_one_url".into(),
                hint: "Set ROUTEAGG_PROVIDER_ONE_URL and/or ROUTEAGG_PROVIDER_TWO_URL".into(),
            });
        }
        Ok(())
    }
}

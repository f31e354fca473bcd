//! Configuration loader for the `skyview` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Routes and the aggregator only ever see the
//! resulting [`Config`] snapshot, never `env::var` directly.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank values as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
}

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_URL: &str = "https://openweathermap.org/img/wn";
pub const DEFAULT_CITY: &str = "Pune";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// OpenWeather API credential. Absence is reported per request, not at startup.
    pub api_key: Option<String>,

    /// Upstream weather API base URL (no trailing slash).
    pub base_url: String,

    /// Base URL for condition icons.
    pub icon_url: String,

    /// City used by `/dashboard` when the caller gives no location.
    pub default_city: String,

    /// Port the HTTP server binds on.
    pub port: u16,

    /// Upstream request timeout in seconds; 0 disables the timeout.
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            icon_url: DEFAULT_ICON_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            port: 8080,
            upstream_timeout_secs: 30,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `OPENWEATHER_API_KEY` – provider credential (missing → 500 per request)
/// - `OPENWEATHER_BASE_URL` – provider base URL
/// - `OPENWEATHER_ICON_URL` – icon base URL
/// - `DEFAULT_CITY` – fallback city (default: Pune)
/// - `SERVER_PORT` – listen port (default: 8080)
/// - `UPSTREAM_TIMEOUT_SECS` – upstream timeout (default: 30, 0 = none)
///
/// Returns an error if any numeric variable is present but malformed.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let api_key = optional_env!("OPENWEATHER_API_KEY");
    let base_url = optional_env!("OPENWEATHER_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or(defaults.base_url);
    let icon_url = optional_env!("OPENWEATHER_ICON_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or(defaults.icon_url);
    let default_city = optional_env!("DEFAULT_CITY").unwrap_or(defaults.default_city);
    let port = parse_env!("SERVER_PORT", u16, defaults.port);
    let upstream_timeout_secs =
        parse_env!("UPSTREAM_TIMEOUT_SECS", u64, defaults.upstream_timeout_secs);

    Ok(Config {
        api_key,
        base_url,
        icon_url,
        default_city,
        port,
        upstream_timeout_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// The API key is masked down to its last four characters.
    pub fn log_config(&self) {
        // ---
        let masked_key = match &self.api_key {
            Some(key) => mask_secret(key),
            None => "<unset>".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  OPENWEATHER_API_KEY   : {}", masked_key);
        tracing::info!("  OPENWEATHER_BASE_URL  : {}", self.base_url);
        tracing::info!("  OPENWEATHER_ICON_URL  : {}", self.icon_url);
        tracing::info!("  DEFAULT_CITY          : {}", self.default_city);
        tracing::info!("  SERVER_PORT           : {}", self.port);
        tracing::info!("  UPSTREAM_TIMEOUT_SECS : {}", self.upstream_timeout_secs);

        if self.api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY is not set; weather requests will fail with 500");
        }
    }
}

fn mask_secret(secret: &str) -> String {
    // ---
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

//! Configuration management for the City Guide server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream document-store API the listings are read from
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as `limit` on every listing request
    pub page_size: u32,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_locale: String,
    pub supported_locales: Vec<String>,
    pub default_theme: String,
    /// Width of the page-number window (ellipsis included)
    pub max_visible_pages: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // CITY_GUIDE_UPSTREAM__BASE_URL -> upstream.base_url
            .add_source(
                Environment::with_prefix("CITY_GUIDE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("display.supported_locales")
                    .try_parsing(true),
            )
            .set_override_option("upstream.base_url", env::var("UPSTREAM_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 10,
            page_size: 12,
            user_agent: format!("city-guide/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string(), "fr".to_string(), "es".to_string()],
            default_theme: "light".to_string(),
            max_visible_pages: crate::listing::pagination::DEFAULT_MAX_VISIBLE,
        }
    }
}

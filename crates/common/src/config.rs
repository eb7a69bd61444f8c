//! Application configuration.

use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::AppResult;

/// Default number of items requested per page.
pub const MAX_CONTENT_ITEMS: u32 = 50;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Instance identity.
    pub instance: InstanceConfig,
    /// Federation endpoint configuration.
    pub federation: FederationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Instance identity, used to build the outgoing `User-Agent`.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
    /// Host name of this instance.
    pub host_name: String,
    /// Software version advertised to remote endpoints.
    #[serde(default = "default_version")]
    pub version: String,
}

impl InstanceConfig {
    /// `User-Agent` value sent on every outbound request.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}-{}", self.host_name, self.version)
    }
}

/// Federation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FederationConfig {
    /// Base URL of the federation endpoint (e.g. `http://localhost:3000/api`).
    pub base_url: Url,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Page size used when a filter does not set one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl FederationConfig {
    /// Federation settings with defaults for everything but the endpoint.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            default_page_size: default_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_connect_timeout() -> u64 {
    10
}

const fn default_page_size() -> u32 {
    MAX_CONTENT_ITEMS
}

fn default_log_filter() -> String {
    "littr=debug".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present) into the process environment
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `LITTR_ENV`)
    /// 4. Environment variables with `LITTR__` prefix
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let env = std::env::var("LITTR_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LITTR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LITTR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let raw = r#"
            [instance]
            host_name = "littr.local"
            version = "1.2.3"

            [federation]
            base_url = "http://localhost:3000/api"
        "#;
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.instance.user_agent(), "littr.local-1.2.3");
        assert_eq!(config.federation.base_url.as_str(), "http://localhost:3000/api");
        assert_eq!(config.federation.request_timeout_secs, 30);
        assert_eq!(config.federation.default_page_size, MAX_CONTENT_ITEMS);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("config/does-not-exist.toml").unwrap_err();
        assert!(matches!(err, crate::AppError::Config(_)));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_federation_config_new() {
        let cfg = FederationConfig::new(Url::parse("http://example.com").unwrap());
        assert_eq!(cfg.connect_timeout_secs, 10);
        assert_eq!(cfg.default_page_size, 50);
    }
}

//! Layered CLI configuration.
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. `asana.toml` in the working directory, or the file given by `--config`
//! 3. `ASANA_*` environment variables (`__` separates nested keys, e.g.
//!    `ASANA_HTTP__TIMEOUT_SECS`)
//! 4. Command-line flags (applied by the caller)

use std::path::{Path, PathBuf};

use asana_client::DEFAULT_BASE_URL;
use asana_http::HttpClientOptions;
use clap::ValueEnum;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "asana.toml";

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "ASANA_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid http.timeout_secs: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// Everything the CLI needs to build a client and wire logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsanaConfig {
    /// Personal access token.
    pub access_token: Option<String>,
    /// Service base URL.
    pub base_url: String,
    /// `json` or `pretty`.
    pub log_format: String,
    /// OTLP gRPC endpoint; spans are exported only when set.
    pub otlp_endpoint: Option<String>,
    /// Transport settings.
    pub http: HttpClientOptions,
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            log_format: LogFormat::Pretty.as_str().to_owned(),
            otlp_endpoint: None,
            http: HttpClientOptions::default(),
        }
    }
}

impl AsanaConfig {
    /// Parsed [`Self::log_format`].
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        LogFormat::from_str(&self.log_format, true)
            .map_err(|_| ConfigError::InvalidLogFormat(self.log_format.clone()))
    }
}

impl std::fmt::Debug for AsanaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("log_format", &self.log_format)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .field("http", &self.http)
            .finish()
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// The merged provider chain, before extraction.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::new()
            .merge(Serialized::defaults(AsanaConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration.
    ///
    /// A missing default file is skipped; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<AsanaConfig, ConfigError> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
        }

        let config: AsanaConfig = Self::figment(path).extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &AsanaConfig) -> Result<(), ConfigError> {
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }

        config.log_format()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = AsanaConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_format().unwrap(), LogFormat::Pretty);
        ConfigLoader::validate(&config).unwrap();
    }

    #[test]
    fn test_file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                base_url = "http://localhost:8080/api/1.0"
                log_format = "json"

                [http]
                timeout_secs = 5
                "#,
            )?;

            let config = ConfigLoader::load(None).unwrap();

            assert_eq!(config.base_url, "http://localhost:8080/api/1.0");
            assert_eq!(config.log_format().unwrap(), LogFormat::Json);
            assert_eq!(config.http.timeout_secs, 5);
            assert_eq!(
                config.http.pool_max_idle_per_host,
                HttpClientOptions::default().pool_max_idle_per_host
            );
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "[http]\ntimeout_secs = 5\n")?;
            jail.set_env("ASANA_HTTP__TIMEOUT_SECS", "12");
            jail.set_env("ASANA_OTLP_ENDPOINT", "http://localhost:4317");

            let config = ConfigLoader::load(None).unwrap();

            assert_eq!(config.http.timeout_secs, 12);
            assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_is_used() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "access_token = \"from-file\"\n")?;
            jail.set_env("ASANA_ACCESS_TOKEN", "from-env");

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).unwrap();

            assert_eq!(config.access_token.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_| {
            let err = ConfigLoader::load(Some(Path::new("missing.toml"))).unwrap_err();

            assert!(matches!(err, ConfigError::FileNotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AsanaConfig {
            base_url: "  ".into(),
            ..AsanaConfig::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyBaseUrl)
        ));

        config.base_url = DEFAULT_BASE_URL.into();
        config.http.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));

        config.http.timeout_secs = 30;
        config.log_format = "xml".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let config = AsanaConfig {
            access_token: Some("secret-token".into()),
            ..AsanaConfig::default()
        };

        assert!(!format!("{config:?}").contains("secret-token"));
    }
}

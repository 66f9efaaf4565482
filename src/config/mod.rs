//! Configuration management module.
//!
//! Supports loading configuration from:
//! - a `.env` file in the working directory
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `TRUERAND__<SECTION>__<KEY>` pattern

mod limits;
mod provider;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use limits::LimitsConfig;
pub use provider::{API_KEY_ENV, ProviderBackend, ProviderConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Generation limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{TRUERAND_PROFILE}.toml` (if `TRUERAND_PROFILE` is set)
    /// 3. Environment variables with `TRUERAND__` prefix
    ///
    /// A `.env` file is read into the process environment first. When no API key
    /// is configured, `RANDOM_ORG_API_KEY` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded. Values are not
    /// checked here; call [`AppConfig::validate`] once overrides are applied.
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let profile =
            std::env::var("TRUERAND_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // TRUERAND__PROVIDER__TIMEOUT_SECS=5 -> provider.timeout_secs = 5
            .add_source(
                Environment::with_prefix("TRUERAND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.provider.resolve_api_key();

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()?;

        if self.limits.max_string_length < 2 {
            return Err(ConfigError::Message(
                "limits.max_string_length must be at least 2".to_string(),
            ));
        }
        if self.limits.upper_bound < 2 {
            return Err(ConfigError::Message(
                "limits.upper_bound must be at least 2".to_string(),
            ));
        }

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\", got \"{}\"",
                self.observability.log_format
            )));
        }

        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider.backend, ProviderBackend::RandomOrg);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.limits.max_string_length, 1000);
        assert_eq!(config.limits.upper_bound, 10_000);
        assert_eq!(config.observability.log_format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[provider]\nbackend = \"offline\"\ntimeout_secs = 3\n\n\
                 [limits]\nupper_bound = 500\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.provider.backend, ProviderBackend::Offline);
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.limits.upper_bound, 500);
        assert_eq!(config.limits.max_string_length, 1000);
        assert_eq!(config.observability.log_level, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.limits.max_string_length = 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.observability.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}

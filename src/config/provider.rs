//! Remote provider configuration.

use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use url::Url;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "RANDOM_ORG_API_KEY";

/// Remote provider backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderBackend {
    /// random.org over HTTPS.
    #[default]
    RandomOrg,
    /// No remote provider; every draw comes from the local generator.
    Offline,
}

impl std::fmt::Display for ProviderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RandomOrg => write!(f, "random_org"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Remote provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Provider backend type.
    #[serde(default)]
    pub backend: ProviderBackend,

    /// API credential for the JSON-RPC endpoint. Empty means none.
    #[serde(default)]
    pub api_key: String,

    /// Plain-text quota endpoint (keyed by caller IP).
    #[serde(default = "default_quota_url")]
    pub quota_url: String,

    /// Hex byte endpoint.
    #[serde(default = "default_bytes_url")]
    pub bytes_url: String,

    /// JSON-RPC endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Default request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_quota_url() -> String {
    "https://www.random.org/quota/".to_string()
}

fn default_bytes_url() -> String {
    "https://www.random.org/cgi-bin/randbyte".to_string()
}

fn default_api_url() -> String {
    "https://api.random.org/json-rpc/4/invoke".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    /// Default timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Fill an empty `api_key` from the process environment.
    pub(crate) fn resolve_api_key(&mut self) {
        if self.credential().is_none()
            && let Ok(key) = std::env::var(API_KEY_ENV)
        {
            self.api_key = key;
        }
    }

    /// Validate provider configuration.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "provider.timeout_secs cannot be 0".to_string(),
            ));
        }

        if self.backend == ProviderBackend::RandomOrg {
            for (key, value) in [
                ("provider.quota_url", &self.quota_url),
                ("provider.bytes_url", &self.bytes_url),
                ("provider.api_url", &self.api_url),
            ] {
                Url::parse(value)
                    .map_err(|e| ConfigError::Message(format!("{key} is not a valid URL: {e}")))?;
            }
        }

        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: ProviderBackend::default(),
            api_key: String::new(),
            quota_url: default_quota_url(),
            bytes_url: default_bytes_url(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_trims_blank_keys() {
        let mut config = ProviderConfig::default();
        assert_eq!(config.credential(), None);

        config.api_key = "   ".to_string();
        assert_eq!(config.credential(), None);

        config.api_key = " abc ".to_string();
        assert_eq!(config.credential(), Some("abc"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ProviderConfig {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let offline = ProviderConfig {
            backend: ProviderBackend::Offline,
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(offline.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ProviderConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

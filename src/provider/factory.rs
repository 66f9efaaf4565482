//! Provider backend factory.
//!
//! Creates the appropriate provider backend based on configuration.

use std::sync::Arc;

use crate::config::{ProviderBackend, ProviderConfig};
use crate::error::AppError;
use crate::provider::http::RandomOrgProvider;
use crate::provider::offline::OfflineProvider;
use crate::provider::traits::RandomProvider;

/// Create a provider backend based on configuration.
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// An `Arc<dyn RandomProvider>` pointing to the configured backend.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn RandomProvider>, AppError> {
    match config.backend {
        ProviderBackend::RandomOrg => {
            let provider = RandomOrgProvider::new(config).map_err(AppError::from)?;
            Ok(Arc::new(provider))
        }
        ProviderBackend::Offline => Ok(Arc::new(OfflineProvider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_random_org_provider() {
        let provider = create_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.backend_name(), "random_org");
    }

    #[test]
    fn test_create_offline_provider() {
        let config = ProviderConfig {
            backend: ProviderBackend::Offline,
            ..Default::default()
        };

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.backend_name(), "offline");
        assert!(
            provider
                .random_bytes(4, std::time::Duration::from_secs(1))
                .is_err()
        );
    }
}

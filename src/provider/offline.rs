//! Offline backend.
//!
//! Never touches the network. Every call reports the provider as unavailable,
//! which routes the service straight to its local generator.

use std::time::Duration;

use crate::domain::{IntegerBatch, QuotaState};
use crate::error::{ProviderError, ProviderResult};
use crate::provider::traits::RandomProvider;

/// Provider that is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl RandomProvider for OfflineProvider {
    fn quota(&self, _credential: Option<&str>, _timeout: Duration) -> ProviderResult<QuotaState> {
        Err(ProviderError::Unavailable)
    }

    fn random_bytes(&self, _count: usize, _timeout: Duration) -> ProviderResult<Vec<u8>> {
        Err(ProviderError::Unavailable)
    }

    fn generate_integers(
        &self,
        _credential: &str,
        _batch: &IntegerBatch,
        _timeout: Duration,
    ) -> ProviderResult<Vec<i64>> {
        Err(ProviderError::Unavailable)
    }

    fn backend_name(&self) -> &'static str {
        "offline"
    }
}

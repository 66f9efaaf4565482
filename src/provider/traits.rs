//! Provider trait definitions.
//!
//! The trait defines the interface to a remote random-number provider, so the
//! service can be driven by the HTTP backend, the offline backend, or a test
//! double without changing its sourcing logic.

use std::time::Duration;

use crate::domain::{IntegerBatch, QuotaState};
use crate::error::ProviderResult;

/// Remote "true random" provider operations.
///
/// Every call blocks the calling thread for at most `timeout`.
pub trait RandomProvider: Send + Sync {
    /// Read the remaining quota.
    ///
    /// With a credential the structured usage endpoint is queried; without
    /// one, the plain-text endpoint keyed by caller IP.
    fn quota(&self, credential: Option<&str>, timeout: Duration) -> ProviderResult<QuotaState>;

    /// Fetch exactly `count` random bytes.
    fn random_bytes(&self, count: usize, timeout: Duration) -> ProviderResult<Vec<u8>>;

    /// Draw a batch of integers through the structured endpoint.
    ///
    /// Returns the provider's `data` array as-is; range and length checks are
    /// the caller's job.
    fn generate_integers(
        &self,
        credential: &str,
        batch: &IntegerBatch,
        timeout: Duration,
    ) -> ProviderResult<Vec<i64>>;

    /// Get the provider backend name.
    fn backend_name(&self) -> &'static str;
}

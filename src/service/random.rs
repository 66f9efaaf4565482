//! Bounded random value service.
//!
//! Sources randomness from the remote provider when its quota allows, and
//! degrades through the fallback tiers otherwise:
//!
//! 1. structured batch request (credential required)
//! 2. remote random bytes mapped into the range
//! 3. local cryptographically-secure generator
//!
//! Every operation takes a strict-mode toggle (`fail_on_error`). Without it,
//! sourcing, quota and timeout failures degrade to the next tier or to an
//! absent result (`Ok(None)`); with it they are returned as errors. Caller
//! input errors are reported in both modes, except for integer bounds which
//! follow the absent/error policy.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{LimitsConfig, ProviderConfig};
use crate::domain::{
    FetchOptions, GeneratedSequence, IntegerBatch, QuotaState, RandomRequest, Source,
};
use crate::error::{AppError, ProviderError, Result};
use crate::provider::traits::RandomProvider;
use crate::service::choice::{Choices, is_primitive};
use crate::service::local::LocalSource;

/// Default alphabet for random strings (`a-z`, `A-Z`, `0-9`).
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Outcome of one sourcing tier.
enum Attempt {
    /// The tier produced the sequence.
    Produced(GeneratedSequence),
    /// The tier settled the call with an absent result.
    Absent,
    /// The tier failed in a way that lets the next tier run.
    FallThrough,
}

/// Distinct values in first-draw order.
struct Distinct {
    values: Vec<i64>,
    seen: HashSet<i64>,
}

impl Distinct {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: i64) {
        if self.seen.insert(value) {
            self.values.push(value);
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

impl Extend<i64> for Distinct {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Service for random bytes, integers, choices and strings.
pub struct RandomService {
    /// Remote provider backend.
    provider: Arc<dyn RandomProvider>,
    /// Local fallback generator.
    local: LocalSource,
    /// Options seeded from configuration.
    defaults: FetchOptions,
    /// Exclusive upper limit on string length.
    max_string_length: usize,
}

impl RandomService {
    /// Create a new random service.
    pub fn new(
        provider: Arc<dyn RandomProvider>,
        config: &ProviderConfig,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            provider,
            local: LocalSource::new(),
            defaults: FetchOptions::new(config.timeout()).credential(config.credential()),
            max_string_length: limits.max_string_length,
        }
    }

    /// Options carrying the configured timeout and credential.
    #[must_use]
    pub fn options(&self) -> FetchOptions {
        self.defaults.clone()
    }

    /// Name of the provider backend in use.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.provider.backend_name()
    }

    /// Read the remaining remote quota.
    ///
    /// # Returns
    ///
    /// `None` when the quota cannot be read and strict mode is off.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `RemoteSource` or `Timeout` on transport failure.
    pub fn remote_quota(&self, options: &FetchOptions) -> Result<Option<QuotaState>> {
        match self.provider.quota(options.api_key(), options.timeout) {
            Ok(quota) => Ok(Some(quota)),
            Err(err) => {
                settle(err, options, "quota check")?;
                Ok(None)
            }
        }
    }

    /// Check whether the remote quota covers `count` bytes.
    ///
    /// With a credential the comparison is `remaining_bits >= count * 8`;
    /// without one it is `remaining_bits / 8 >= count`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `QuotaExceeded` when the quota is insufficient,
    /// and `RemoteSource`/`Timeout` when it cannot be read.
    pub fn check_remote_quota(&self, count: u64, options: &FetchOptions) -> Result<bool> {
        let Some(quota) = self.remote_quota(options)? else {
            return Ok(false);
        };

        let sufficient = if options.api_key().is_some() {
            quota.covers_bits_for(count)
        } else {
            quota.covers_bytes_for(count)
        };

        if sufficient {
            return Ok(true);
        }

        if options.fail_on_error {
            return Err(AppError::QuotaExceeded {
                requested_bytes: count,
                remaining_bytes: quota.remaining_bytes(),
            });
        }

        debug!(
            requested_bytes = count,
            remaining_bytes = quota.remaining_bytes(),
            "Remote quota insufficient"
        );
        Ok(false)
    }

    /// Fetch `count` random bytes.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `QuotaExceeded`, `RemoteSource` or `Timeout`
    /// instead of falling back to the local generator.
    pub fn fetch_random_bytes(&self, count: usize, options: &FetchOptions) -> Result<Vec<u8>> {
        if self.check_remote_quota(count as u64, options)? {
            match self.provider.random_bytes(count, options.timeout) {
                Ok(bytes) => return Ok(bytes),
                Err(err) => settle(err, options, "random bytes")?,
            }
        }

        debug!(count, "Generating bytes locally");
        Ok(self.local.bytes(count))
    }

    /// Fetch `request.count` integers in `[request.minimum, request.maximum]`.
    ///
    /// # Returns
    ///
    /// `None` when the request cannot be satisfied and strict mode is off:
    /// inverted bounds, a range too small for a unique draw, a malformed
    /// remote answer, or a unique draw that ran out of time.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `InvalidRange`, `QuotaExceeded`,
    /// `RemoteSource` or `Timeout`.
    pub fn fetch_random_integers(
        &self,
        request: &RandomRequest,
    ) -> Result<Option<GeneratedSequence>> {
        let options = &request.options;

        if let Err(reason) = request.validate() {
            if options.fail_on_error {
                return Err(AppError::InvalidRange(reason));
            }
            debug!(%reason, "Rejecting integer request");
            return Ok(None);
        }

        if request.count == 0 {
            return Ok(Some(GeneratedSequence::new(Vec::new(), Source::Local)));
        }

        if self.check_remote_quota(request.count as u64, options)? {
            let attempt = match options.api_key() {
                Some(api_key) => self.from_remote_api(request, api_key)?,
                None => self.from_remote_bytes(request)?,
            };
            match attempt {
                Attempt::Produced(sequence) => return Ok(Some(sequence)),
                Attempt::Absent => return Ok(None),
                Attempt::FallThrough => {}
            }
        }

        match self.from_local(request)? {
            Attempt::Produced(sequence) => Ok(Some(sequence)),
            Attempt::Absent | Attempt::FallThrough => Ok(None),
        }
    }

    /// Choose `count` elements of `choices`, in draw order.
    ///
    /// Draws 1-based indices with [`Self::fetch_random_integers`]. An absent
    /// draw yields an empty iterator.
    ///
    /// # Errors
    ///
    /// Returns `EmptyChoices` or `InvalidArgument` for bad input, and the
    /// strict-mode errors of [`Self::fetch_random_integers`].
    pub fn random_choice<'a, T>(
        &self,
        choices: &'a [T],
        count: usize,
        options: &FetchOptions,
    ) -> Result<Choices<'a, T>> {
        if choices.is_empty() {
            return Err(AppError::EmptyChoices);
        }
        if count < 1 {
            return Err(AppError::InvalidArgument(
                "count must be greater than 0".to_string(),
            ));
        }
        let maximum = i64::try_from(choices.len())
            .map_err(|_| AppError::InvalidArgument("too many choices".to_string()))?;

        let request = RandomRequest::new(count, 1, maximum, options.clone());
        let indices = self
            .fetch_random_integers(&request)?
            .map(GeneratedSequence::into_values)
            .unwrap_or_default();

        Ok(Choices::new(choices, indices))
    }

    /// Choose from a JSON array, or from the values of a JSON object.
    ///
    /// Object keys are never eligible, and object values must be primitive
    /// scalars.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedValueType` for non-scalar object values,
    /// `InvalidArgument` for JSON that is neither array nor object, and the
    /// errors of [`Self::random_choice`].
    pub fn random_choice_json(
        &self,
        choices: &Value,
        count: usize,
        options: &FetchOptions,
    ) -> Result<Vec<Value>> {
        let values: Vec<Value> = match choices {
            Value::Array(items) => items.clone(),
            Value::Object(map) => {
                if let Some((key, _)) = map.iter().find(|(_, value)| !is_primitive(value)) {
                    return Err(AppError::UnsupportedValueType(format!(
                        "value of {key:?} must be a primitive type (null, bool, number, string)"
                    )));
                }
                map.values().cloned().collect()
            }
            _ => {
                return Err(AppError::InvalidArgument(
                    "choices must be a JSON array or object".to_string(),
                ));
            }
        };

        Ok(self
            .random_choice(&values, count, options)?
            .cloned()
            .collect())
    }

    /// Generate a random string of `length` characters from `valid_characters`.
    ///
    /// With `options.unique`, the alphabet is de-duplicated and every
    /// character of the result is distinct.
    ///
    /// # Returns
    ///
    /// `None` when the underlying draw is absent.
    ///
    /// # Errors
    ///
    /// Returns `LengthOutOfRange`, `InsufficientAlphabet` or `EmptyChoices`
    /// for bad input, and the strict-mode errors of [`Self::fetch_random_integers`].
    pub fn random_string(
        &self,
        length: usize,
        valid_characters: &str,
        options: &FetchOptions,
    ) -> Result<Option<String>> {
        if length < 1 || length >= self.max_string_length {
            return Err(AppError::LengthOutOfRange {
                length,
                max: self.max_string_length,
            });
        }

        let mut alphabet: Vec<char> = valid_characters.chars().collect();
        if options.unique {
            let mut seen = HashSet::new();
            alphabet.retain(|c| seen.insert(*c));
            if length > alphabet.len() {
                return Err(AppError::InsufficientAlphabet {
                    length,
                    available: alphabet.len(),
                });
            }
        }

        let drawn: String = self.random_choice(&alphabet, length, options)?.collect();
        Ok((!drawn.is_empty()).then_some(drawn))
    }

    /// Tier 1: structured batch request.
    fn from_remote_api(&self, request: &RandomRequest, api_key: &str) -> Result<Attempt> {
        let options = &request.options;
        let batch = IntegerBatch {
            count: request.count,
            minimum: request.minimum,
            maximum: request.maximum,
            replacement: !options.unique,
        };

        let values = match self
            .provider
            .generate_integers(api_key, &batch, options.timeout)
        {
            Ok(values) => values,
            Err(err) if err.is_transport() => {
                settle(err, options, "integer batch")?;
                return Ok(Attempt::FallThrough);
            }
            Err(err) => return absent_on_malformed(err.to_string(), options),
        };

        if let Err(reason) = check_batch(request, &values) {
            return absent_on_malformed(reason, options);
        }

        debug!(count = values.len(), "Integers drawn by remote API");
        Ok(Attempt::Produced(GeneratedSequence::new(
            values,
            Source::RemoteApi,
        )))
    }

    /// Tier 2: remote bytes through the modulo mapping.
    ///
    /// Unique draws re-request only the missing count until done or out of time.
    fn from_remote_bytes(&self, request: &RandomRequest) -> Result<Attempt> {
        let options = &request.options;

        if !options.unique {
            return match self.provider.random_bytes(request.count, options.timeout) {
                Ok(bytes) => Ok(Attempt::Produced(GeneratedSequence::new(
                    map_bytes(request, bytes),
                    Source::RemoteBytes,
                ))),
                Err(err) => {
                    settle(err, options, "random bytes")?;
                    Ok(Attempt::FallThrough)
                }
            };
        }

        let started = Instant::now();
        let mut drawn = Distinct::with_capacity(request.count);
        while drawn.len() < request.count {
            if started.elapsed() > options.timeout {
                return unique_timeout(request, Source::RemoteBytes);
            }

            let deficit = request.count - drawn.len();
            match self.provider.random_bytes(deficit, options.timeout) {
                Ok(bytes) => drawn.extend(map_bytes(request, bytes)),
                Err(err) => {
                    settle(err, options, "random bytes")?;
                    return Ok(Attempt::FallThrough);
                }
            }
        }

        Ok(Attempt::Produced(GeneratedSequence::new(
            drawn.values,
            Source::RemoteBytes,
        )))
    }

    /// Tier 3: local secure generator.
    fn from_local(&self, request: &RandomRequest) -> Result<Attempt> {
        if !request.options.unique {
            return Ok(Attempt::Produced(GeneratedSequence::new(
                self.local.integers(request),
                Source::Local,
            )));
        }

        let started = Instant::now();
        let mut drawn = Distinct::with_capacity(request.count);
        while drawn.len() < request.count {
            if started.elapsed() > request.options.timeout {
                return unique_timeout(request, Source::Local);
            }
            drawn.push(request.map_draw(self.local.draw()));
        }

        Ok(Attempt::Produced(GeneratedSequence::new(
            drawn.values,
            Source::Local,
        )))
    }
}

/// Apply the strict-mode policy to a provider failure.
///
/// An unavailable provider (offline backend) is never an error: it simply has
/// no remote tier.
fn settle(err: ProviderError, options: &FetchOptions, operation: &str) -> Result<()> {
    if matches!(err, ProviderError::Unavailable) {
        debug!(operation, "Remote provider unavailable");
        return Ok(());
    }
    if options.fail_on_error {
        return Err(err.into());
    }
    warn!(operation, error = %err, "Remote provider failed, falling back");
    Ok(())
}

fn absent_on_malformed(reason: String, options: &FetchOptions) -> Result<Attempt> {
    if options.fail_on_error {
        return Err(AppError::RemoteSource(reason));
    }
    warn!(%reason, "Malformed remote response");
    Ok(Attempt::Absent)
}

fn unique_timeout(request: &RandomRequest, source: Source) -> Result<Attempt> {
    let message = format!(
        "generating {} unique random integers within the range {}-{} took longer than {:?}",
        request.count, request.minimum, request.maximum, request.options.timeout
    );
    if request.options.fail_on_error {
        return Err(AppError::Timeout(message));
    }
    warn!(%source, "{message}");
    Ok(Attempt::Absent)
}

fn map_bytes(request: &RandomRequest, bytes: Vec<u8>) -> Vec<i64> {
    bytes
        .into_iter()
        .map(|byte| request.map_draw(u64::from(byte)))
        .collect()
}

/// Verify a structured batch against the request.
fn check_batch(request: &RandomRequest, values: &[i64]) -> std::result::Result<(), String> {
    if values.len() != request.count {
        return Err(format!(
            "requested {} integers, received {}",
            request.count,
            values.len()
        ));
    }
    if let Some(value) = values.iter().find(|v| !request.contains(**v)) {
        return Err(format!(
            "received {value} outside the range {}-{}",
            request.minimum, request.maximum
        ));
    }
    if request.options.unique {
        let mut seen = HashSet::with_capacity(values.len());
        if !values.iter().all(|v| seen.insert(*v)) {
            return Err("received repeated integers for a unique draw".to_string());
        }
    }
    Ok(())
}

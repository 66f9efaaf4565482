//! Request value objects for the random value service.

use std::time::Duration;

/// Sourcing and failure policy shared by every random operation.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Network timeout, and wall-clock budget for unique draws.
    pub timeout: Duration,
    /// Raise sourcing/timeout/quota failures instead of degrading.
    pub fail_on_error: bool,
    /// Credential for the structured remote endpoint.
    pub credential: Option<String>,
    /// Require pairwise-distinct values within one call.
    pub unique: bool,
}

impl FetchOptions {
    /// Create options with the given timeout and no credential.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            fail_on_error: false,
            credential: None,
            unique: false,
        }
    }

    /// Set the uniqueness constraint.
    #[must_use]
    pub const fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set strict mode.
    #[must_use]
    pub const fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    /// Set the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set or clear the credential. Blank strings clear it.
    #[must_use]
    pub fn credential(mut self, credential: Option<impl Into<String>>) -> Self {
        self.credential = credential
            .map(Into::into)
            .filter(|key: &String| !key.trim().is_empty());
        self
    }

    /// The credential, if one is set.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOptions")
            .field("timeout", &self.timeout)
            .field("fail_on_error", &self.fail_on_error)
            .field("credential", &self.credential.as_ref().map(|_| "***"))
            .field("unique", &self.unique)
            .finish()
    }
}

/// A request for `count` integers in `[minimum, maximum]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomRequest {
    /// Number of integers wanted.
    pub count: usize,
    /// Smallest allowed value.
    pub minimum: i64,
    /// Largest allowed value.
    pub maximum: i64,
    /// Sourcing and failure policy.
    pub options: FetchOptions,
}

impl RandomRequest {
    /// Create a new request.
    #[must_use]
    pub const fn new(count: usize, minimum: i64, maximum: i64, options: FetchOptions) -> Self {
        Self {
            count,
            minimum,
            maximum,
            options,
        }
    }

    /// Number of distinct values in `[minimum, maximum]`, or 0 when inverted.
    #[must_use]
    pub fn span(&self) -> u128 {
        if self.minimum > self.maximum {
            0
        } else {
            u128::from(self.maximum.abs_diff(self.minimum)) + 1
        }
    }

    /// Map a raw draw into `[minimum, maximum]` with `draw mod span + minimum`.
    ///
    /// This is the provider-compatible mapping and is biased whenever the span
    /// does not divide the draw space evenly.
    #[must_use]
    pub fn map_draw(&self, draw: u64) -> i64 {
        let offset = u128::from(draw) % self.span();
        // offset < span <= 2^64, so the sum stays inside [minimum, maximum]
        i64::try_from(i128::from(self.minimum) + offset as i128).unwrap_or(self.maximum)
    }

    /// Whether `value` lies within the requested bounds.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.minimum <= value && value <= self.maximum
    }

    /// Validate bounds and the uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns a description of the violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.minimum > self.maximum {
            return Err(
                "Minimum value must be less than or equal to the maximum value".to_string(),
            );
        }
        if self.options.unique && self.span() < self.count as u128 {
            return Err(format!(
                "It is not possible to generate {} unique random integers given the range {}-{}",
                self.count, self.minimum, self.maximum
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(count: usize, minimum: i64, maximum: i64, unique: bool) -> RandomRequest {
        RandomRequest::new(
            count,
            minimum,
            maximum,
            FetchOptions::default().unique(unique),
        )
    }

    #[test]
    fn test_span() {
        assert_eq!(request(1, 1, 10, false).span(), 10);
        assert_eq!(request(1, 5, 5, false).span(), 1);
        assert_eq!(request(1, 10, 1, false).span(), 0);
        assert_eq!(request(1, i64::MIN, i64::MAX, false).span(), 1 << 64);
    }

    #[test]
    fn test_map_draw_uses_modulo() {
        let req = request(1, 1, 10, false);
        assert_eq!(req.map_draw(0), 1);
        assert_eq!(req.map_draw(9), 10);
        assert_eq!(req.map_draw(10), 1);
        assert_eq!(req.map_draw(255), 6);

        let negative = request(1, -3, 3, false);
        assert_eq!(negative.map_draw(0), -3);
        assert_eq!(negative.map_draw(6), 3);

        let full = request(1, i64::MIN, i64::MAX, false);
        assert_eq!(full.map_draw(0), i64::MIN);
        assert_eq!(full.map_draw(u64::MAX), i64::MAX);
    }

    #[test]
    fn test_validate() {
        assert!(request(10, 1, 10, true).validate().is_ok());
        assert!(request(11, 1, 10, true).validate().is_err());
        assert!(request(11, 1, 10, false).validate().is_ok());
        assert!(request(1, 10, 1, false).validate().is_err());
    }

    #[test]
    fn test_credential_blank_is_none() {
        let options = FetchOptions::default().credential(Some("  "));
        assert_eq!(options.api_key(), None);

        let options = FetchOptions::default().credential(Some("key"));
        assert_eq!(options.api_key(), Some("key"));

        let options = options.credential(None::<String>);
        assert_eq!(options.api_key(), None);
    }

    #[test]
    fn test_debug_hides_credential() {
        let options = FetchOptions::default().credential(Some("secret"));
        let rendered = format!("{options:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }
}

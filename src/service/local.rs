//! Local secure fallback generator.

use rand::{Rng, RngCore};

use crate::domain::RandomRequest;

/// Cryptographically-secure local randomness.
///
/// Backed by `rand::rng()`, a ChaCha-based generator seeded and periodically
/// reseeded from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl LocalSource {
    /// Create a new local source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate `count` random bytes.
    #[must_use]
    pub fn bytes(&self, count: usize) -> Vec<u8> {
        let mut buf = vec![0u8; count];
        rand::rng().fill_bytes(&mut buf);
        buf
    }

    /// Draw one raw 64-bit value.
    #[must_use]
    pub fn draw(&self) -> u64 {
        rand::rng().random()
    }

    /// Draw `request.count` integers with the request's modulo mapping.
    ///
    /// Values may repeat.
    #[must_use]
    pub fn integers(&self, request: &RandomRequest) -> Vec<i64> {
        let mut rng = rand::rng();
        (0..request.count)
            .map(|_| request.map_draw(rng.random()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchOptions;

    #[test]
    fn test_bytes_length() {
        let local = LocalSource::new();
        assert_eq!(local.bytes(0).len(), 0);
        assert_eq!(local.bytes(33).len(), 33);
    }

    #[test]
    fn test_integers_within_range() {
        let request = RandomRequest::new(500, -5, 5, FetchOptions::default());
        let values = LocalSource::new().integers(&request);
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_single_value_range() {
        let request = RandomRequest::new(10, 7, 7, FetchOptions::default());
        assert_eq!(LocalSource::new().integers(&request), vec![7; 10]);
    }
}

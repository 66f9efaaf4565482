//! Remote quota reading.

use serde::Serialize;

/// Remaining capacity reported by the remote provider.
///
/// Fetched fresh for every check and never cached. The provider may report a
/// negative figure once an allowance is overdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaState {
    /// Remaining random bits.
    pub remaining_bits: i64,
}

impl QuotaState {
    /// Create a quota reading from a bit count.
    #[must_use]
    pub const fn from_bits(remaining_bits: i64) -> Self {
        Self { remaining_bits }
    }

    /// Remaining whole bytes, truncated toward zero.
    #[must_use]
    pub const fn remaining_bytes(&self) -> i64 {
        self.remaining_bits / 8
    }

    /// Bit-level comparison used with the credentialed usage endpoint.
    #[must_use]
    pub fn covers_bits_for(&self, count: u64) -> bool {
        i128::from(self.remaining_bits) >= i128::from(count) * 8
    }

    /// Byte-level comparison used with the plain quota endpoint.
    #[must_use]
    pub fn covers_bytes_for(&self, count: u64) -> bool {
        i128::from(self.remaining_bytes()) >= i128::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_bytes_truncates() {
        assert_eq!(QuotaState::from_bits(500).remaining_bytes(), 62);
        assert_eq!(QuotaState::from_bits(7).remaining_bytes(), 0);
        assert_eq!(QuotaState::from_bits(-12).remaining_bytes(), -1);
    }

    #[test]
    fn test_coverage() {
        let quota = QuotaState::from_bits(500);
        assert!(quota.covers_bits_for(62));
        assert!(!quota.covers_bits_for(63));
        assert!(quota.covers_bytes_for(62));
        assert!(!quota.covers_bytes_for(1000));

        // 503 bits cover 62 bytes either way but not 63
        let quota = QuotaState::from_bits(503);
        assert!(!quota.covers_bits_for(63));
        assert!(!quota.covers_bytes_for(63));

        assert!(!QuotaState::from_bits(-8).covers_bytes_for(0));
        assert!(QuotaState::from_bits(0).covers_bits_for(0));
    }
}

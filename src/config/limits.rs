//! Generation limits.

use serde::Deserialize;

/// Limits applied by the string helper and the range evaluator.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsConfig {
    /// Exclusive upper limit on generated string length.
    #[serde(default = "default_max_string_length")]
    pub max_string_length: usize,

    /// Exclusive upper end of open `>`/`>=` range bounds.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: i64,
}

const fn default_max_string_length() -> usize {
    1000
}

const fn default_upper_bound() -> i64 {
    10_000
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_string_length: default_max_string_length(),
            upper_bound: default_upper_bound(),
        }
    }
}

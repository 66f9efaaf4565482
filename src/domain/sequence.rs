//! Generated sequence types.

use serde::Serialize;

/// Which fallback tier produced a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Structured batch request with a credential.
    RemoteApi,
    /// Remote random bytes mapped into the range.
    RemoteBytes,
    /// Local cryptographically-secure generator.
    Local,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemoteApi => write!(f, "remote_api"),
            Self::RemoteBytes => write!(f, "remote_bytes"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// An ordered sequence of generated integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSequence {
    /// Values in draw order.
    pub values: Vec<i64>,
    /// Tier the values came from.
    pub source: Source,
}

impl GeneratedSequence {
    /// Create a new sequence.
    #[must_use]
    pub const fn new(values: Vec<i64>, source: Source) -> Self {
        Self { values, source }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the sequence, returning the values.
    #[must_use]
    pub fn into_values(self) -> Vec<i64> {
        self.values
    }
}

impl IntoIterator for GeneratedSequence {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

//! Evaluated integer sets.

use std::collections::BTreeSet;

use serde::Serialize;

/// A sorted, deduplicated sequence of integers produced by a range expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RangeSet(Vec<i64>);

impl RangeSet {
    /// Number of integers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    /// Consume the set, returning the sorted integers.
    #[must_use]
    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl From<BTreeSet<i64>> for RangeSet {
    fn from(set: BTreeSet<i64>) -> Self {
        Self(set.into_iter().collect())
    }
}

impl FromIterator<i64> for RangeSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<_>>().into()
    }
}

impl IntoIterator for RangeSet {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[i64]> for RangeSet {
    fn eq(&self, other: &[i64]) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<[i64; N]> for RangeSet {
    fn eq(&self, other: &[i64; N]) -> bool {
        self.0 == other
    }
}

impl PartialEq<Vec<i64>> for RangeSet {
    fn eq(&self, other: &Vec<i64>) -> bool {
        &self.0 == other
    }
}

impl std::fmt::Display for RangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for value in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        Ok(())
    }
}

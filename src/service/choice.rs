//! Random choice results.

use serde_json::Value;

/// Elements drawn from a slice of choices, in draw order.
///
/// Finite and single-pass: once consumed it yields nothing more.
#[derive(Debug, Clone)]
pub struct Choices<'a, T> {
    choices: &'a [T],
    /// 0-based, each one within `choices`.
    positions: std::vec::IntoIter<usize>,
}

impl<'a, T> Choices<'a, T> {
    /// Wrap 1-based `indices` into `choices`. Indices outside the slice are dropped.
    pub(crate) fn new(choices: &'a [T], indices: Vec<i64>) -> Self {
        let positions: Vec<usize> = indices
            .into_iter()
            .filter_map(|index| usize::try_from(index).ok()?.checked_sub(1))
            .filter(|&position| position < choices.len())
            .collect();

        Self {
            choices,
            positions: positions.into_iter(),
        }
    }
}

impl<'a, T> Iterator for Choices<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let choices = self.choices;
        self.positions.next().and_then(|position| choices.get(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T> ExactSizeIterator for Choices<'_, T> {}

/// Whether a JSON value is a primitive scalar (null, bool, number or string).
#[must_use]
pub const fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_one_based_indices() {
        let letters = ['a', 'b', 'c'];
        let drawn: String = Choices::new(&letters, vec![3, 1, 1, 2]).collect();
        assert_eq!(drawn, "caab");
    }

    #[test]
    fn test_single_pass() {
        let numbers = [10, 20];
        let mut choices = Choices::new(&numbers, vec![2, 1]);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices.by_ref().copied().collect::<Vec<_>>(), vec![20, 10]);
        assert_eq!(choices.next(), None);
        assert_eq!(choices.len(), 0);
    }

    #[test]
    fn test_len_counts_only_valid_indices() {
        let letters = ['a', 'b'];
        let mut choices = Choices::new(&letters, vec![0, 2, 9, -1, 1]);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices.next(), Some(&'b'));
        assert_eq!(choices.len(), 1);
        assert_eq!(choices.next(), Some(&'a'));
        assert_eq!(choices.len(), 0);
        assert_eq!(choices.next(), None);
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive(&json!(null)));
        assert!(is_primitive(&json!(true)));
        assert!(is_primitive(&json!(1.5)));
        assert!(is_primitive(&json!("x")));
        assert!(!is_primitive(&json!([1])));
        assert!(!is_primitive(&json!({"a": 1})));
    }
}

//! DepSet: the explicit dependency collector.
//!
//! A render pass records every state key it reads into a `DepSet`, which the
//! binder then diffs against the previous subscription set. The collector is
//! an ordinary value handed into the render call — there is no global
//! "currently active collector" slot, so nested or concurrent collection
//! attempts cannot exist.

use std::collections::btree_set;
use std::collections::BTreeSet;

/// Set of state keys read during one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepSet(BTreeSet<String>);

impl DepSet {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a read of `key`.
    pub fn record(&mut self, key: &str) {
        self.0.insert(key.to_owned());
    }

    /// Whether `key` was recorded.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Number of distinct keys recorded.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the recorded keys in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for DepSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DepSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_contains() {
        let mut deps = DepSet::new();
        deps.record("count");
        assert!(deps.contains("count"));
        assert!(!deps.contains("other"));
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn record_is_idempotent() {
        let mut deps = DepSet::new();
        deps.record("a");
        deps.record("a");
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn iterates_sorted() {
        let mut deps = DepSet::new();
        deps.record("b");
        deps.record("a");
        let keys: Vec<&str> = deps.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_default() {
        let deps = DepSet::default();
        assert!(deps.is_empty());
    }
}

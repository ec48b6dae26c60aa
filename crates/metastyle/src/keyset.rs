//! Key sets for selection and probe state, and filter membership.

use std::collections::HashSet;
use std::hash::Hash;

/// A set of feature keys with O(1) membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> Default for KeySet<K> {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> KeySet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Eq + Hash + Clone> KeySet<K> {
    /// Keys present in exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &KeySet<K>) -> HashSet<K> {
        self.keys
            .symmetric_difference(&other.keys)
            .cloned()
            .collect()
    }
}

impl<K: Eq + Hash> FromIterator<K> for KeySet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash> Extend<K> for KeySet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl<K: Eq + Hash> IntoIterator for KeySet<K> {
    type Item = K;
    type IntoIter = std::collections::hash_set::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

/// Membership predicate describing which features pass the active filter.
pub trait KeyFilter<K> {
    fn includes(&self, key: &K) -> bool;
}

impl<K, F> KeyFilter<K> for F
where
    F: Fn(&K) -> bool,
{
    fn includes(&self, key: &K) -> bool {
        self(key)
    }
}

impl<K: Eq + Hash> KeyFilter<K> for KeySet<K> {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

/// A filter that either admits every key or only the keys of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<K: Eq + Hash> {
    All,
    Only(KeySet<K>),
}

impl<K: Eq + Hash> Default for Filter<K> {
    fn default() -> Self {
        Filter::All
    }
}

impl<K: Eq + Hash> KeyFilter<K> for Filter<K> {
    fn includes(&self, key: &K) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(keys) => keys.contains(key),
        }
    }
}

impl<K: Eq + Hash> FromIterator<K> for Filter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Filter::Only(iter.into_iter().collect())
    }
}

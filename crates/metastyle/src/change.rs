//! Change detection: deciding which features need their style recomputed.
//!
//! The base stage of resolution only asks whether the selection is empty,
//! so a selection that becomes empty or non-empty changes the base of every
//! feature. Any other mutation of the selection or probe sets only affects
//! the keys that entered or left the set.

use std::collections::HashSet;
use std::hash::Hash;

use crate::keyset::KeySet;

/// True when `prev` and `new` differ in emptiness.
pub fn should_recompute_all<K: Eq + Hash>(prev: &KeySet<K>, new: &KeySet<K>) -> bool {
    prev.is_empty() != new.is_empty()
}

/// The set of features a mutation requires recomputing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecomputePlan<K: Eq + Hash> {
    Nothing,
    Keys(HashSet<K>),
    All,
}

impl<K: Eq + Hash> Default for RecomputePlan<K> {
    fn default() -> Self {
        RecomputePlan::Nothing
    }
}

impl<K: Eq + Hash> RecomputePlan<K> {
    /// Plan covering `keys`, or `Nothing` when there are none.
    pub fn keys(keys: impl IntoIterator<Item = K>) -> Self {
        let keys: HashSet<K> = keys.into_iter().collect();
        if keys.is_empty() {
            RecomputePlan::Nothing
        } else {
            RecomputePlan::Keys(keys)
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, RecomputePlan::Nothing)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RecomputePlan::All)
    }

    /// Combines two plans. `All` absorbs everything.
    pub fn merge(self, other: RecomputePlan<K>) -> Self {
        match (self, other) {
            (RecomputePlan::All, _) | (_, RecomputePlan::All) => RecomputePlan::All,
            (RecomputePlan::Nothing, plan) | (plan, RecomputePlan::Nothing) => plan,
            (RecomputePlan::Keys(mut a), RecomputePlan::Keys(b)) => {
                a.extend(b);
                RecomputePlan::Keys(a)
            }
        }
    }
}

/// Which session set a tracker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedSet {
    /// Emptiness transitions request a full pass.
    Selection,
    /// Always diffed key by key.
    Probe,
}

/// Remembers the previous contents of a tracked set and turns each update
/// into a [`RecomputePlan`].
#[derive(Debug, Clone)]
pub struct KeySetTracker<K: Eq + Hash> {
    kind: TrackedSet,
    current: KeySet<K>,
}

impl<K: Eq + Hash + Clone> KeySetTracker<K> {
    pub fn new(kind: TrackedSet) -> Self {
        Self {
            kind,
            current: KeySet::new(),
        }
    }

    pub fn selection() -> Self {
        Self::new(TrackedSet::Selection)
    }

    pub fn probe() -> Self {
        Self::new(TrackedSet::Probe)
    }

    pub fn kind(&self) -> TrackedSet {
        self.kind
    }

    /// The contents recorded by the last update.
    pub fn current(&self) -> &KeySet<K> {
        &self.current
    }

    /// Records `next` as the new contents and returns what must be
    /// recomputed.
    pub fn update(&mut self, next: KeySet<K>) -> RecomputePlan<K> {
        let plan = if self.kind == TrackedSet::Selection
            && should_recompute_all(&self.current, &next)
        {
            RecomputePlan::All
        } else {
            RecomputePlan::keys(self.current.symmetric_difference(&next))
        };

        self.current = next;
        plan
    }
}

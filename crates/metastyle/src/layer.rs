//! Feature layer: owns features, session state and resolved stacks.
//!
//! Mutations do not resolve anything themselves. They queue a
//! [`RecomputePlan`] following the change-detection rules, and
//! [`flush`](FeatureLayer::flush) drains the coalesced plan. This lets a
//! burst of updates (a drag-select, a pointer sweep) cost one pass.
//!
//! ```rust
//! use metastyle::{Feature, FeatureLayer, KeySet};
//! use metastyle::style::{MetaStyleKind, StyleDescriptor, ZOrder};
//!
//! let mut layer = FeatureLayer::new();
//! for key in ["a", "b", "c"] {
//!     layer.add_feature(
//!         Feature::new(key).with_style(MetaStyleKind::Normal, StyleDescriptor::null()),
//!     );
//! }
//!
//! layer.set_probe(["b"].into_iter().collect());
//! assert_eq!(layer.flush(), 1);
//! assert_eq!(layer.style(&"b").unwrap().z_index(), Some(ZOrder::PROBED));
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::change::{KeySetTracker, RecomputePlan};
use crate::feature::Feature;
use crate::keyset::{Filter, KeyFilter, KeySet};
use crate::resolve::StyleResolver;
use crate::style::{MetaStyleKind, StyleStack, StyleVariant};

#[derive(Debug, Clone)]
pub struct FeatureLayer<K: Eq + Hash> {
    features: HashMap<K, Feature<K>>,
    styles: HashMap<K, StyleStack>,
    selection: KeySetTracker<K>,
    probe: KeySetTracker<K>,
    filter: Filter<K>,
    selectable: bool,
    pending: RecomputePlan<K>,
}

impl<K: Eq + Hash + Clone + Debug> Default for FeatureLayer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone + Debug> FeatureLayer<K> {
    /// An empty, selectable layer with no filter.
    pub fn new() -> Self {
        Self {
            features: HashMap::new(),
            styles: HashMap::new(),
            selection: KeySetTracker::selection(),
            probe: KeySetTracker::probe(),
            filter: Filter::All,
            selectable: true,
            pending: RecomputePlan::Nothing,
        }
    }

    /// Adds or replaces a feature and resolves its style right away.
    pub fn add_feature(&mut self, feature: Feature<K>) {
        let key = feature.key.clone();
        self.features.insert(key.clone(), feature);
        self.recompute([key]);
    }

    pub fn remove_feature(&mut self, key: &K) -> Option<Feature<K>> {
        self.styles.remove(key);
        self.features.remove(key)
    }

    pub fn feature(&self, key: &K) -> Option<&Feature<K>> {
        self.features.get(key)
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature<K>> {
        self.features.values()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The last resolved stack of a feature.
    pub fn style(&self, key: &K) -> Option<&StyleStack> {
        self.styles.get(key)
    }

    pub fn selection(&self) -> &KeySet<K> {
        self.selection.current()
    }

    pub fn probe(&self) -> &KeySet<K> {
        self.probe.current()
    }

    pub fn filter(&self) -> &Filter<K> {
        &self.filter
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Work queued since the last flush.
    pub fn pending(&self) -> &RecomputePlan<K> {
        &self.pending
    }

    pub fn set_selection(&mut self, keys: KeySet<K>) {
        let plan = self.selection.update(keys);
        self.queue(plan);
    }

    pub fn set_probe(&mut self, keys: KeySet<K>) {
        let plan = self.probe.update(keys);
        self.queue(plan);
    }

    /// Replaces the filter, queueing the features whose membership changed.
    pub fn set_filter(&mut self, filter: Filter<K>) {
        let plan = match (&self.filter, &filter) {
            (Filter::All, Filter::All) => RecomputePlan::Nothing,
            (Filter::Only(before), Filter::Only(after)) => {
                RecomputePlan::keys(before.symmetric_difference(after))
            }
            (before, after) => RecomputePlan::keys(
                self.features
                    .keys()
                    .filter(|key| before.includes(*key) != after.includes(*key))
                    .cloned(),
            ),
        };

        self.filter = filter;
        self.queue(plan);
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        if self.selectable != selectable {
            self.selectable = selectable;
            self.queue(RecomputePlan::All);
        }
    }

    /// Changes one meta-style of a feature. Returns false when the key is
    /// unknown.
    pub fn set_meta_style(
        &mut self,
        key: &K,
        kind: MetaStyleKind,
        variant: Option<StyleVariant>,
    ) -> bool {
        let Some(feature) = self.features.get_mut(key) else {
            warn!(?key, style = kind.name(), "meta-style update for unknown feature");
            return false;
        };

        feature.styles.set(kind, variant);
        self.queue(RecomputePlan::keys([key.clone()]));
        true
    }

    /// Changes a feature's own z-order. Returns false when the key is
    /// unknown.
    pub fn set_z_order(&mut self, key: &K, z_order: Option<i64>) -> bool {
        let Some(feature) = self.features.get_mut(key) else {
            warn!(?key, "z-order update for unknown feature");
            return false;
        };

        feature.z_order = z_order;
        self.queue(RecomputePlan::keys([key.clone()]));
        true
    }

    /// Resolves the listed features now. Unknown keys are skipped.
    /// Returns how many features were resolved.
    pub fn recompute(&mut self, keys: impl IntoIterator<Item = K>) -> usize {
        let resolver = StyleResolver::new(
            self.selection.current(),
            self.probe.current(),
            &self.filter,
            self.selectable,
        );

        let mut count = 0;
        for key in keys {
            let Some(feature) = self.features.get(&key) else {
                continue;
            };
            let stack = resolver.resolve(feature);
            trace!(?key, z_index = ?stack.z_index(), layers = stack.len(), "resolved");
            self.styles.insert(key, stack);
            count += 1;
        }
        count
    }

    /// Resolves every feature. Returns the feature count.
    pub fn recompute_all(&mut self) -> usize {
        let keys: Vec<K> = self.features.keys().cloned().collect();
        debug!(features = keys.len(), "recomputing all styles");
        self.recompute(keys)
    }

    /// Drains pending work. Returns how many features were resolved.
    pub fn flush(&mut self) -> usize {
        match std::mem::take(&mut self.pending) {
            RecomputePlan::Nothing => 0,
            RecomputePlan::All => self.recompute_all(),
            RecomputePlan::Keys(keys) => {
                debug!(keys = keys.len(), "recomputing changed styles");
                self.recompute(keys)
            }
        }
    }

    fn queue(&mut self, plan: RecomputePlan<K>) {
        let pending = std::mem::take(&mut self.pending);
        self.pending = pending.merge(plan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleDescriptor, ZOrder};

    fn layer(keys: &[&'static str]) -> FeatureLayer<&'static str> {
        let mut layer = FeatureLayer::new();
        for &key in keys {
            layer.add_feature(
                Feature::new(key)
                    .with_z_order(1)
                    .with_style(MetaStyleKind::Normal, StyleDescriptor::null())
                    .with_style(
                        MetaStyleKind::Unselected,
                        StyleDescriptor::null().with_z_index(-1),
                    ),
            );
        }
        layer
    }

    fn keys(list: &[&'static str]) -> KeySet<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_add_feature_resolves_immediately() {
        let layer = layer(&["a"]);
        assert_eq!(layer.style(&"a").unwrap().z_index(), Some(1));
        assert!(layer.pending().is_nothing());
    }

    #[test]
    fn test_first_selection_recomputes_everything() {
        let mut layer = layer(&["a", "b", "c"]);
        layer.set_selection(keys(&["a"]));
        assert!(layer.pending().is_all());
        assert_eq!(layer.flush(), 3);
        assert_eq!(layer.style(&"a").unwrap().z_index(), Some(ZOrder::SELECTED));
    }

    #[test]
    fn test_selection_change_while_non_empty_is_incremental() {
        let mut layer = layer(&["a", "b", "c"]);
        layer.set_selection(keys(&["a"]));
        layer.flush();

        layer.set_selection(keys(&["a", "b"]));
        assert_eq!(layer.flush(), 1);
    }

    #[test]
    fn test_selectable_toggle() {
        let mut layer = layer(&["a", "b"]);
        layer.set_selectable(true);
        assert!(layer.pending().is_nothing());

        layer.set_selectable(false);
        assert_eq!(layer.flush(), 2);
    }

    #[test]
    fn test_filter_only_to_only_diffs() {
        let mut layer = layer(&["a", "b", "c"]);
        layer.set_filter(Filter::Only(keys(&["a", "b"])));
        assert_eq!(layer.flush(), 1);
        assert!(layer.style(&"c").unwrap().is_null());

        layer.set_filter(Filter::Only(keys(&["b", "c"])));
        assert_eq!(layer.flush(), 2);
        assert_eq!(layer.style(&"c").unwrap().z_index(), Some(1));
        assert_eq!(layer.style(&"a").unwrap(), &StyleStack::null());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let mut layer = layer(&["a"]);
        layer.set_probe(keys(&["zzz"]));
        assert_eq!(layer.flush(), 0);
        assert!(!layer.set_z_order(&"zzz", Some(3)));
    }

    #[test]
    fn test_set_meta_style_queues_only_that_key() {
        let mut layer = layer(&["a", "b"]);
        assert!(layer.set_meta_style(
            &"a",
            MetaStyleKind::Normal,
            Some(StyleDescriptor::null().into())
        ));
        assert_eq!(layer.pending(), &RecomputePlan::keys(["a"]));
        assert_eq!(layer.flush(), 1);
    }

    #[test]
    fn test_remove_feature_drops_style() {
        let mut layer = layer(&["a"]);
        assert!(layer.remove_feature(&"a").is_some());
        assert!(layer.style(&"a").is_none());
        assert!(layer.is_empty());
    }
}

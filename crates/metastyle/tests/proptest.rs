//! Property-based tests for style resolution using proptest.

use proptest::prelude::*;

use metastyle::style::{MetaStyleKind, StyleDescriptor, StyleStack, StyleVariant, ZOrder};
use metastyle::{resolve_style, Feature, FeatureLayer, Filter, KeySet, RecomputePlan};

// ============================================================================
// Strategies
// ============================================================================

fn descriptor_strategy() -> impl Strategy<Value = StyleDescriptor> {
    prop::option::of(-100i64..100).prop_map(|z| StyleDescriptor {
        z_index: z,
        ..StyleDescriptor::null()
    })
}

fn variant_strategy() -> impl Strategy<Value = Option<StyleVariant>> {
    prop::option::of(prop_oneof![
        descriptor_strategy().prop_map(StyleVariant::Replace),
        prop::collection::vec(descriptor_strategy(), 1..4).prop_map(StyleVariant::Append),
    ])
}

fn feature_strategy() -> impl Strategy<Value = Feature<u8>> {
    (
        0u8..16,
        prop::option::of(any::<i64>()),
        variant_strategy(),
        variant_strategy(),
        variant_strategy(),
        variant_strategy(),
    )
        .prop_map(|(key, z_order, normal, unselected, selected, probed)| {
            let mut feature = Feature::new(key);
            feature.z_order = z_order;
            feature.styles.set(MetaStyleKind::Normal, normal);
            feature.styles.set(MetaStyleKind::Unselected, unselected);
            feature.styles.set(MetaStyleKind::Selected, selected);
            feature.styles.set(MetaStyleKind::Probed, probed);
            feature
        })
}

fn keyset_strategy() -> impl Strategy<Value = KeySet<u8>> {
    prop::collection::hash_set(0u8..16, 0..6).prop_map(|keys| keys.into_iter().collect())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Features outside the filter always resolve to the null style.
    #[test]
    fn excluded_features_are_null(
        feature in feature_strategy(),
        selection in keyset_strategy(),
        probe in keyset_strategy(),
        selectable in any::<bool>(),
    ) {
        let filter = |k: &u8| *k != feature.key;
        let stack = resolve_style(&feature, &selection, &probe, &filter, selectable);
        prop_assert_eq!(stack, StyleStack::null());
    }

    /// A non-selectable layer draws the normal variant untouched.
    #[test]
    fn not_selectable_is_normal(
        feature in feature_strategy(),
        selection in keyset_strategy(),
        probe in keyset_strategy(),
    ) {
        let stack = resolve_style(&feature, &selection, &probe, &Filter::All, false);
        let normal = feature.styles.variant_or_null(MetaStyleKind::Normal);
        prop_assert_eq!(stack.descriptors(), normal.descriptors());
    }

    /// The lead z-index follows probe > selection > own z-order.
    #[test]
    fn lead_z_index_precedence(
        feature in feature_strategy(),
        selection in keyset_strategy(),
        probe in keyset_strategy(),
    ) {
        let stack = resolve_style(&feature, &selection, &probe, &Filter::All, true);
        let expected = if probe.contains(&feature.key) {
            ZOrder::PROBED
        } else if selection.contains(&feature.key) {
            ZOrder::SELECTED
        } else {
            ZOrder::ordinary(feature.z_order)
        };
        prop_assert_eq!(stack.z_index(), Some(expected));
        prop_assert!(!stack.is_empty());
    }

    /// Unselected, unprobed features never reach the reserved band.
    #[test]
    fn ordinary_features_stay_below_sentinels(
        feature in feature_strategy(),
        selection in keyset_strategy(),
    ) {
        let mut selection = selection;
        selection.remove(&feature.key);
        let stack = resolve_style(&feature, &selection, &KeySet::new(), &Filter::All, true);
        prop_assert!(stack.z_index().unwrap() <= ZOrder::ORDINARY_MAX);
    }

    /// Resolving twice gives the same stack.
    #[test]
    fn resolution_is_deterministic(
        feature in feature_strategy(),
        selection in keyset_strategy(),
        probe in keyset_strategy(),
    ) {
        let a = resolve_style(&feature, &selection, &probe, &Filter::All, true);
        let b = resolve_style(&feature, &selection, &probe, &Filter::All, true);
        prop_assert_eq!(a, b);
    }

    /// Incremental flushing ends in the same state as a full recompute.
    #[test]
    fn incremental_matches_full_pass(
        features in prop::collection::vec(feature_strategy(), 1..12),
        updates in prop::collection::vec((keyset_strategy(), keyset_strategy()), 1..6),
    ) {
        let mut layer = FeatureLayer::new();
        for feature in features {
            layer.add_feature(feature);
        }

        for (selection, probe) in updates {
            layer.set_selection(selection);
            layer.set_probe(probe);
            layer.flush();
        }

        let incremental: Vec<(u8, StyleStack)> = layer
            .features()
            .map(|f| (f.key, layer.style(&f.key).unwrap().clone()))
            .collect();

        let mut full = layer.clone();
        full.recompute_all();
        for (key, stack) in incremental {
            prop_assert_eq!(Some(&stack), full.style(&key));
        }
    }

    /// Selection updates that keep the set non-empty never ask for a full pass.
    #[test]
    fn non_empty_selection_changes_are_keyed(
        first in keyset_strategy(),
        second in keyset_strategy(),
    ) {
        prop_assume!(!first.is_empty() && !second.is_empty());

        let mut layer: FeatureLayer<u8> = FeatureLayer::new();
        layer.set_selection(first);
        layer.flush();
        layer.set_selection(second);
        prop_assert!(!matches!(layer.pending(), RecomputePlan::All));
    }
}

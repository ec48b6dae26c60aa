//! Style-state resolution.
//!
//! Combines a feature's meta-styles with the session snapshot (selection,
//! probe, filter, selectable flag) into the stack to render. Stages run in
//! a fixed order, each later stage overriding or drawing on top of the
//! earlier ones:
//!
//! 1. Filtered out: null style, stop.
//! 2. Not selectable: `normal` as configured, stop.
//! 3. Base: `unselected` when a selection exists that excludes the feature
//!    (and the feature is not probed), otherwise `normal`.
//! 4. The lead descriptor takes the feature's own z-order.
//! 5. Selected: layer `selected`, lead z-index becomes [`ZOrder::SELECTED`].
//! 6. Probed: layer `probed`, lead z-index becomes [`ZOrder::PROBED`].
//!
//! # Example
//!
//! ```rust
//! use metastyle::{resolve_style, Feature, Filter, KeySet};
//! use metastyle::style::{MetaStyleKind, StyleDescriptor, ZOrder};
//!
//! let feature = Feature::new("a")
//!     .with_z_order(3)
//!     .with_style(MetaStyleKind::Normal, StyleDescriptor::null())
//!     .with_style(MetaStyleKind::Probed, StyleDescriptor::null());
//!
//! let selection = KeySet::new();
//! let probe: KeySet<&str> = ["a"].into_iter().collect();
//!
//! let stack = resolve_style(&feature, &selection, &probe, &Filter::All, true);
//! assert_eq!(stack.z_index(), Some(ZOrder::PROBED));
//! ```

use std::hash::Hash;

use crate::feature::Feature;
use crate::keyset::{KeyFilter, KeySet};
use crate::style::{MetaStyleKind, StyleStack, StyleVariant, ZOrder};

/// A borrowed, read-only snapshot of session state that resolves features.
pub struct StyleResolver<'a, K: Eq + Hash, F: ?Sized> {
    selection: &'a KeySet<K>,
    probe: &'a KeySet<K>,
    filter: &'a F,
    selectable: bool,
}

impl<K: Eq + Hash, F: ?Sized> Clone for StyleResolver<'_, K, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Eq + Hash, F: ?Sized> Copy for StyleResolver<'_, K, F> {}

impl<'a, K, F> StyleResolver<'a, K, F>
where
    K: Eq + Hash,
    F: KeyFilter<K> + ?Sized,
{
    pub fn new(
        selection: &'a KeySet<K>,
        probe: &'a KeySet<K>,
        filter: &'a F,
        selectable: bool,
    ) -> Self {
        Self {
            selection,
            probe,
            filter,
            selectable,
        }
    }

    /// Computes the style stack for `feature`.
    pub fn resolve(&self, feature: &Feature<K>) -> StyleStack {
        let key = &feature.key;
        let styles = &feature.styles;

        if !self.filter.includes(key) {
            return StyleStack::null();
        }

        if !self.selectable {
            return StyleStack::from_variant(&styles.variant_or_null(MetaStyleKind::Normal));
        }

        let selected = self.selection.contains(key);
        let probed = self.probe.contains(key);

        let base = if !self.selection.is_empty() && !selected && !probed {
            MetaStyleKind::Unselected
        } else {
            MetaStyleKind::Normal
        };
        let mut stack = StyleStack::from_variant(&styles.variant_or_null(base));
        stack.set_lead_z_index(ZOrder::ordinary(feature.z_order));

        if selected {
            layer(&mut stack, styles.get(MetaStyleKind::Selected), ZOrder::SELECTED);
        }

        if probed {
            layer(&mut stack, styles.get(MetaStyleKind::Probed), ZOrder::PROBED);
        }

        stack
    }
}

fn layer(stack: &mut StyleStack, variant: Option<&StyleVariant>, z_index: i64) {
    match variant {
        Some(variant) => stack.apply(variant),
        None => stack.apply(&StyleVariant::null()),
    }
    stack.set_lead_z_index(z_index);
}

/// Resolves a single feature against the given snapshot.
pub fn resolve_style<K, F>(
    feature: &Feature<K>,
    selection: &KeySet<K>,
    probe: &KeySet<K>,
    filter: &F,
    selectable: bool,
) -> StyleStack
where
    K: Eq + Hash,
    F: KeyFilter<K> + ?Sized,
{
    StyleResolver::new(selection, probe, filter, selectable).resolve(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyset::Filter;
    use crate::style::{Fill, Rgba, StyleDescriptor};

    fn colored(r: u8) -> StyleDescriptor {
        StyleDescriptor::null().with_fill(Fill {
            color: Rgba::new(r, 0, 0, 1.0),
        })
    }

    fn feature(key: &'static str) -> Feature<&'static str> {
        Feature::new(key)
            .with_z_order(5)
            .with_style(MetaStyleKind::Normal, colored(1))
            .with_style(MetaStyleKind::Unselected, colored(2))
            .with_style(MetaStyleKind::Selected, colored(3))
            .with_style(MetaStyleKind::Probed, colored(4))
    }

    fn keys(list: &[&'static str]) -> KeySet<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_filtered_out_is_null() {
        let filter: Filter<&str> = Filter::Only(keys(&["b"]));
        let stack = resolve_style(&feature("a"), &keys(&["a"]), &keys(&["a"]), &filter, true);
        assert_eq!(stack, StyleStack::null());
    }

    #[test]
    fn test_not_selectable_is_normal_exactly() {
        let stack = resolve_style(
            &feature("a"),
            &keys(&["a"]),
            &keys(&["a"]),
            &Filter::All,
            false,
        );
        assert_eq!(stack.descriptors(), &[colored(1)]);
        assert_eq!(stack.z_index(), None);
    }

    #[test]
    fn test_no_selection_uses_normal_with_own_z() {
        let stack = resolve_style(&feature("a"), &keys(&[]), &keys(&[]), &Filter::All, true);
        assert_eq!(stack.descriptors(), &[colored(1).with_z_index(5)]);
    }

    #[test]
    fn test_other_selected_uses_unselected() {
        let stack = resolve_style(&feature("a"), &keys(&["b"]), &keys(&[]), &Filter::All, true);
        assert_eq!(stack.descriptors(), &[colored(2).with_z_index(5)]);
    }

    #[test]
    fn test_probed_but_unselected_keeps_normal_base() {
        let stack = resolve_style(
            &feature("a"),
            &keys(&["b"]),
            &keys(&["a"]),
            &Filter::All,
            true,
        );
        assert_eq!(stack.descriptors()[0].fill, colored(1).fill);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.z_index(), Some(ZOrder::PROBED));
    }

    #[test]
    fn test_selected_appends_and_raises() {
        let stack = resolve_style(&feature("a"), &keys(&["a"]), &keys(&[]), &Filter::All, true);
        assert_eq!(
            stack.descriptors(),
            &[colored(1).with_z_index(ZOrder::SELECTED), colored(3)]
        );
    }

    #[test]
    fn test_selected_and_probed() {
        let stack = resolve_style(
            &feature("a"),
            &keys(&["a"]),
            &keys(&["a"]),
            &Filter::All,
            true,
        );
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.z_index(), Some(ZOrder::PROBED));
        assert_eq!(stack.descriptors()[2], colored(4));
    }

    #[test]
    fn test_replace_variant_discards_base() {
        let f = feature("a").with_style(
            MetaStyleKind::Selected,
            StyleVariant::Replace(colored(9)),
        );
        let stack = resolve_style(&f, &keys(&["a"]), &keys(&[]), &Filter::All, true);
        assert_eq!(
            stack.descriptors(),
            &[colored(9).with_z_index(ZOrder::SELECTED)]
        );
    }

    #[test]
    fn test_missing_variants_substitute_null() {
        let f = Feature::new("a");
        let stack = resolve_style(&f, &keys(&["a"]), &keys(&[]), &Filter::All, true);
        assert!(stack.is_null());
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.z_index(), Some(ZOrder::SELECTED));
    }

    #[test]
    fn test_resolver_snapshot_is_reusable() {
        let selection = keys(&["a"]);
        let probe = keys(&[]);
        let filter = |k: &&str| *k != "c";
        let resolver = StyleResolver::new(&selection, &probe, &filter, true);

        assert_eq!(resolver.resolve(&feature("a")).z_index(), Some(ZOrder::SELECTED));
        assert_eq!(resolver.resolve(&feature("b")).z_index(), Some(5));
        assert!(resolver.resolve(&feature("c")).is_null());
    }
}

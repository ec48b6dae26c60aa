//! Features: keyed visual entities carrying their meta-styles.

use crate::style::{MetaStyleKind, MetaStyles, StyleVariant};

/// A visual entity with a stable key, an optional z-order and four style
/// variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature<K> {
    pub key: K,
    pub z_order: Option<i64>,
    pub styles: MetaStyles,
}

impl<K> Feature<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            z_order: None,
            styles: MetaStyles::default(),
        }
    }

    pub fn with_z_order(mut self, z_order: i64) -> Self {
        self.z_order = Some(z_order);
        self
    }

    pub fn with_styles(mut self, styles: MetaStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_style(mut self, kind: MetaStyleKind, variant: impl Into<StyleVariant>) -> Self {
        self.styles.set(kind, Some(variant.into()));
        self
    }
}

//! Style variants, style stacks, and the four-variant meta-style bundle.

use serde::Serialize;

use super::descriptor::StyleDescriptor;

/// One configured look of a feature.
///
/// When a variant is layered onto an existing stack, `Replace` discards the
/// stack and `Append` draws its descriptors on top of it.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleVariant {
    Replace(StyleDescriptor),
    Append(Vec<StyleDescriptor>),
}

impl StyleVariant {
    /// The null style: a single empty descriptor, appended.
    pub fn null() -> Self {
        StyleVariant::Append(vec![StyleDescriptor::null()])
    }

    /// Builds an `Append` variant. An empty sequence becomes the null style.
    pub fn append(descriptors: Vec<StyleDescriptor>) -> Self {
        if descriptors.is_empty() {
            Self::null()
        } else {
            StyleVariant::Append(descriptors)
        }
    }

    pub fn descriptors(&self) -> &[StyleDescriptor] {
        match self {
            StyleVariant::Replace(d) => std::slice::from_ref(d),
            StyleVariant::Append(ds) => ds,
        }
    }

    pub fn is_replace(&self) -> bool {
        matches!(self, StyleVariant::Replace(_))
    }

    /// Returns the same variant with every descriptor faded by `factor`.
    pub fn faded(&self, factor: f64) -> Self {
        match self {
            StyleVariant::Replace(d) => StyleVariant::Replace(d.faded(factor)),
            StyleVariant::Append(ds) => {
                StyleVariant::Append(ds.iter().map(|d| d.faded(factor)).collect())
            }
        }
    }
}

impl From<StyleDescriptor> for StyleVariant {
    fn from(descriptor: StyleDescriptor) -> Self {
        StyleVariant::Append(vec![descriptor])
    }
}

impl From<Vec<StyleDescriptor>> for StyleVariant {
    fn from(descriptors: Vec<StyleDescriptor>) -> Self {
        StyleVariant::append(descriptors)
    }
}

/// An ordered sequence of descriptors ready for rendering.
///
/// Later entries draw on top of earlier ones. The lead descriptor (index 0)
/// carries the z-index that places the feature among its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleStack(Vec<StyleDescriptor>);

impl StyleStack {
    /// A stack holding only the null descriptor.
    pub fn null() -> Self {
        StyleStack(vec![StyleDescriptor::null()])
    }

    /// Starts a stack from a variant.
    pub fn from_variant(variant: &StyleVariant) -> Self {
        StyleStack(variant.descriptors().to_vec())
    }

    /// Layers `variant` onto this stack, replacing or appending.
    pub fn apply(&mut self, variant: &StyleVariant) {
        match variant {
            StyleVariant::Replace(d) => self.0 = vec![d.clone()],
            StyleVariant::Append(ds) => self.0.extend(ds.iter().cloned()),
        }
    }

    /// Forces the lead descriptor's z-index.
    pub fn set_lead_z_index(&mut self, z_index: i64) {
        if let Some(lead) = self.0.first_mut() {
            lead.z_index = Some(z_index);
        }
    }

    /// Z-index of the lead descriptor.
    pub fn z_index(&self) -> Option<i64> {
        self.0.first().and_then(|d| d.z_index)
    }

    pub fn lead(&self) -> Option<&StyleDescriptor> {
        self.0.first()
    }

    pub fn descriptors(&self) -> &[StyleDescriptor] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when nothing in the stack draws.
    pub fn is_null(&self) -> bool {
        self.0.iter().all(StyleDescriptor::is_null)
    }
}

impl From<Vec<StyleDescriptor>> for StyleStack {
    fn from(descriptors: Vec<StyleDescriptor>) -> Self {
        StyleStack(descriptors)
    }
}

/// Names of the four meta-style slots on a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaStyleKind {
    Normal,
    /// Used when a selection exists and the feature is not part of it.
    Unselected,
    Selected,
    Probed,
}

impl MetaStyleKind {
    pub const ALL: [MetaStyleKind; 4] = [
        MetaStyleKind::Normal,
        MetaStyleKind::Unselected,
        MetaStyleKind::Selected,
        MetaStyleKind::Probed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetaStyleKind::Normal => "normal",
            MetaStyleKind::Unselected => "unselected",
            MetaStyleKind::Selected => "selected",
            MetaStyleKind::Probed => "probed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// The four style variants of a feature. Unset slots resolve to the null
/// style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetaStyles {
    pub normal: Option<StyleVariant>,
    pub unselected: Option<StyleVariant>,
    pub selected: Option<StyleVariant>,
    pub probed: Option<StyleVariant>,
}

impl MetaStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: MetaStyleKind, variant: impl Into<StyleVariant>) -> Self {
        self.set(kind, Some(variant.into()));
        self
    }

    pub fn get(&self, kind: MetaStyleKind) -> Option<&StyleVariant> {
        self.slot(kind).as_ref()
    }

    pub fn set(&mut self, kind: MetaStyleKind, variant: Option<StyleVariant>) {
        *self.slot_mut(kind) = variant;
    }

    /// The configured variant, or the null style when unset.
    pub fn variant_or_null(&self, kind: MetaStyleKind) -> StyleVariant {
        self.get(kind).cloned().unwrap_or_else(StyleVariant::null)
    }

    fn slot(&self, kind: MetaStyleKind) -> &Option<StyleVariant> {
        match kind {
            MetaStyleKind::Normal => &self.normal,
            MetaStyleKind::Unselected => &self.unselected,
            MetaStyleKind::Selected => &self.selected,
            MetaStyleKind::Probed => &self.probed,
        }
    }

    fn slot_mut(&mut self, kind: MetaStyleKind) -> &mut Option<StyleVariant> {
        match kind {
            MetaStyleKind::Normal => &mut self.normal,
            MetaStyleKind::Unselected => &mut self.unselected,
            MetaStyleKind::Selected => &mut self.selected,
            MetaStyleKind::Probed => &mut self.probed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(n: i64) -> StyleDescriptor {
        StyleDescriptor::null().with_z_index(n)
    }

    #[test]
    fn test_empty_append_is_null() {
        assert_eq!(StyleVariant::append(vec![]), StyleVariant::null());
    }

    #[test]
    fn test_apply_append_extends() {
        let mut stack = StyleStack::from_variant(&StyleVariant::append(vec![z(1)]));
        stack.apply(&StyleVariant::append(vec![z(2), z(3)]));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.z_index(), Some(1));
    }

    #[test]
    fn test_apply_replace_discards() {
        let mut stack = StyleStack::from(vec![z(1), z(2)]);
        stack.apply(&StyleVariant::Replace(z(9)));
        assert_eq!(stack.descriptors(), &[z(9)]);
    }

    #[test]
    fn test_set_lead_z_index_only_touches_first() {
        let mut stack = StyleStack::from(vec![z(1), z(2)]);
        stack.set_lead_z_index(40);
        assert_eq!(stack.descriptors()[0].z_index, Some(40));
        assert_eq!(stack.descriptors()[1].z_index, Some(2));
    }

    #[test]
    fn test_meta_style_kind_names() {
        for kind in MetaStyleKind::ALL {
            assert_eq!(MetaStyleKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(MetaStyleKind::from_name("hovered"), None);
    }

    #[test]
    fn test_unset_slot_is_null() {
        let styles = MetaStyles::new().with(MetaStyleKind::Normal, z(1));
        assert_eq!(
            styles.variant_or_null(MetaStyleKind::Probed),
            StyleVariant::null()
        );
        assert_eq!(
            styles.variant_or_null(MetaStyleKind::Normal),
            StyleVariant::Append(vec![z(1)])
        );
    }
}

//! Style building blocks: colours, descriptors, variants and stacks.
//!
//! A feature is drawn from a [`StyleStack`], an ordered list of
//! [`StyleDescriptor`]s. Stacks are assembled from the feature's four
//! [`StyleVariant`]s (its [`MetaStyles`]) by the resolver.

mod builder;
mod color;
mod descriptor;
mod variant;
mod zorder;

pub use builder::{
    probe_halo, selection_halo, FillSpec, StrokeSpec, PROBE_HALO_WIDTH, PROBE_LINE_WIDTH,
    SELECT_WIDTH,
};
pub use color::{ColorError, ColorValue, Rgba};
pub use descriptor::{Fill, LineCap, LineJoin, Stroke, StyleDescriptor};
pub use variant::{MetaStyleKind, MetaStyles, StyleStack, StyleVariant};
pub use zorder::ZOrder;

//! # Metastyle - Style-State Resolution for Map Feature Layers
//!
//! `metastyle` decides how each feature of an interactive map layer should
//! be drawn given the shared session state: which features are selected,
//! which one the pointer is over (probed), which pass the active filter,
//! and whether the layer is selectable at all.
//!
//! Nothing here renders. The output is a [`StyleStack`](style::StyleStack)
//! per feature, ready to hand to whatever draws the map.
//!
//! ## Core Concepts
//!
//! - [`Feature`]: keyed entity with a z-order and four style variants
//!   (`normal`, `unselected`, `selected`, `probed`)
//! - [`resolve_style`] / [`StyleResolver`]: the pure resolution function
//! - [`KeySetTracker`] and [`should_recompute_all`]: which features a
//!   selection or probe change invalidates
//! - [`FeatureLayer`]: owns features and session state, queues and flushes
//!   recomputation
//! - [`MetaStyleSheet`]: named style bundles loaded from YAML
//!
//! ## Precedence
//!
//! What the pointer is over outranks what is selected, which outranks the
//! selected/unselected base distinction, which outranks nothing drawn for
//! filtered-out features. Z-orders encode this through the reserved
//! [`ZOrder`](style::ZOrder) sentinels.
//!
//! ## Quick Start
//!
//! ```rust
//! use metastyle::{Feature, FeatureLayer, MetaStyleSheet};
//! use metastyle::style::ZOrder;
//!
//! let sheet = MetaStyleSheet::from_yaml(r##"
//! parcels:
//!   normal:
//!     - fill: { color: "#88aa44", alpha: 0.6 }
//!     - stroke: { color: "#000", weight: 1 }
//!   unselected:
//!     fade: 0.3
//!   selected: selection-halo
//!   probed: probe-halo
//! "##).unwrap();
//!
//! let styles = sheet.get("parcels").unwrap();
//! let mut layer = FeatureLayer::new();
//! for (key, z) in [(1u32, 3), (2, 1), (3, 2)] {
//!     layer.add_feature(Feature::new(key).with_z_order(z).with_styles(styles.clone()));
//! }
//!
//! layer.set_selection([2].into_iter().collect());
//! layer.flush();
//!
//! assert_eq!(layer.style(&2).unwrap().z_index(), Some(ZOrder::SELECTED));
//! assert_eq!(layer.style(&1).unwrap().z_index(), Some(3));
//! ```

mod change;
mod error;
mod feature;
mod keyset;
mod layer;
mod resolve;
pub mod style;
mod stylesheet;

pub use change::{should_recompute_all, KeySetTracker, RecomputePlan, TrackedSet};
pub use error::{Result, StylesheetError};
pub use feature::Feature;
pub use keyset::{Filter, KeyFilter, KeySet};
pub use layer::FeatureLayer;
pub use resolve::{resolve_style, StyleResolver};
pub use stylesheet::MetaStyleSheet;

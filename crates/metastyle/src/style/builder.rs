//! Builders turning Weave fill/stroke settings into descriptors, and the
//! derived selection and probe halos.

use super::color::{ColorValue, Rgba};
use super::descriptor::{Fill, LineCap, LineJoin, Stroke, StyleDescriptor};
use super::zorder::ZOrder;

/// Extra width of the shadow drawn under a selected feature.
pub const SELECT_WIDTH: f64 = 5.0;
/// Extra width of the white probe ring.
pub const PROBE_HALO_WIDTH: f64 = 4.0;
/// Width of the black line outlining the probe ring.
pub const PROBE_LINE_WIDTH: f64 = 1.0;

/// Fill settings as stored in session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSpec {
    pub color: Option<ColorValue>,
    pub alpha: f64,
}

impl Default for FillSpec {
    fn default() -> Self {
        Self {
            color: None,
            alpha: 1.0,
        }
    }
}

impl FillSpec {
    /// Builds a fill, multiplying alpha by `fade`. No colour means a fully
    /// transparent fill.
    pub fn to_fill(&self, fade: f64) -> Fill {
        let color = self
            .color
            .map(|c| c.to_rgba(self.alpha * fade))
            .unwrap_or(Rgba::TRANSPARENT);
        Fill { color }
    }
}

/// Stroke settings as stored in session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSpec {
    pub color: Option<ColorValue>,
    pub alpha: f64,
    pub weight: f64,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
    pub miter_limit: Option<f64>,
}

impl Default for StrokeSpec {
    fn default() -> Self {
        Self {
            color: None,
            alpha: 1.0,
            weight: 1.0,
            line_cap: None,
            line_join: None,
            miter_limit: None,
        }
    }
}

impl StrokeSpec {
    /// Builds a stroke, multiplying alpha by `fade`.
    ///
    /// No colour means opaque black. A zero weight produces a fully
    /// transparent stroke, since renderers ignore zero line widths.
    pub fn to_stroke(&self, fade: f64) -> Stroke {
        let mut color = self
            .color
            .map(|c| c.to_rgba(self.alpha * fade))
            .unwrap_or(Rgba::BLACK);

        if self.weight == 0.0 {
            color.a = 0.0;
        }

        Stroke {
            color,
            width: self.weight,
            line_cap: self.line_cap.unwrap_or_default(),
            line_join: self.line_join.unwrap_or_default(),
            miter_limit: self.miter_limit.unwrap_or(Stroke::DEFAULT_MITER_LIMIT),
        }
    }
}

/// Shadow drawn beneath a selected feature, sized from its base stroke.
pub fn selection_halo(base: &Stroke) -> Vec<StyleDescriptor> {
    let shadow = Stroke {
        color: Rgba::new(0, 0, 0, 0.5),
        width: base.width + SELECT_WIDTH,
        ..*base
    };

    vec![StyleDescriptor::null()
        .with_stroke(shadow)
        .with_z_index(ZOrder::SELECTION_HALO)]
}

/// Two-ring halo around a probed feature: a black outline with a white ring
/// inside it.
pub fn probe_halo(base: &Stroke) -> Vec<StyleDescriptor> {
    let outline = Stroke::new(
        Rgba::BLACK,
        base.width + PROBE_HALO_WIDTH + PROBE_LINE_WIDTH,
    );
    let ring = Stroke::new(Rgba::WHITE, base.width + PROBE_HALO_WIDTH);

    vec![
        StyleDescriptor::null()
            .with_stroke(outline)
            .with_z_index(ZOrder::PROBE_HALO_OUTER),
        StyleDescriptor::null()
            .with_stroke(ring)
            .with_z_index(ZOrder::PROBE_HALO_INNER),
    ]
}

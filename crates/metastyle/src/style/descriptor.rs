//! Elementary style descriptors: one fill, one stroke, one z-index.

use serde::Serialize;

use super::color::Rgba;

/// How the ends of stroked lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// Parses a Weave line cap. `"none"` is Weave's name for `butt`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" | "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// How corners of stroked lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Bevel,
    #[default]
    Round,
    Miter,
}

impl LineJoin {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bevel" => Some(LineJoin::Bevel),
            "round" => Some(LineJoin::Round),
            "miter" => Some(LineJoin::Miter),
            _ => None,
        }
    }
}

/// Area fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub color: Rgba,
}

/// Outline stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
}

impl Stroke {
    pub const DEFAULT_MITER_LIMIT: f64 = 10.0;

    pub fn new(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: Self::DEFAULT_MITER_LIMIT,
        }
    }
}

/// A single drawable layer of a feature's style.
///
/// A descriptor with neither fill nor stroke is the null style and draws
/// nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyleDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl StyleDescriptor {
    /// The null style.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn is_null(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none()
    }

    /// Scales fill and stroke alpha by `factor`.
    pub fn faded(&self, factor: f64) -> Self {
        Self {
            fill: self.fill.map(|f| Fill {
                color: f.color.faded(factor),
            }),
            stroke: self.stroke.map(|s| Stroke {
                color: s.color.faded(factor),
                ..s
            }),
            z_index: self.z_index,
        }
    }
}

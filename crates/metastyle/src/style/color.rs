//! Colour values as they arrive from Weave session state.
//!
//! Weave stores colours either as integers (`0xRRGGBB` written in decimal,
//! e.g. `16711680` for red) or as strings. Strings may be hex codes
//! (`"#ff0000"`, `"#f00"`) or the same decimal integer in text form
//! (`"16711680"`).
//!
//! # Example
//!
//! ```rust
//! use metastyle::style::{ColorValue, Rgba};
//!
//! let red = ColorValue::parse_str("#ff0000").unwrap();
//! assert_eq!(red.to_rgba(0.5), Rgba::new(255, 0, 0, 0.5));
//!
//! let same = ColorValue::Int(16711680);
//! assert_eq!(same.to_rgba(0.5), red.to_rgba(0.5));
//! ```

use serde::Serialize;
use thiserror::Error;

/// Errors produced while parsing a colour value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color: #{0} (must be 3 or 6 digits)")]
    InvalidHex(String),

    #[error("color {0} is out of range (0x000000-0xffffff)")]
    OutOfRange(u64),

    #[error("invalid color value: {0}")]
    Invalid(String),
}

/// An RGBA colour with an 8-bit channel triplet and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same colour with alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Returns the same colour with alpha multiplied by `factor`.
    pub fn faded(self, factor: f64) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A colour without alpha, in one of the encodings Weave uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue {
    /// `0xRRGGBB` packed into an integer.
    Int(u32),
    /// Explicit channels, from a hex string.
    Rgb(u8, u8, u8),
}

impl ColorValue {
    /// Parses a colour from a YAML value: integers, or strings accepted by
    /// [`parse_str`](ColorValue::parse_str).
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Self, ColorError> {
        match value {
            serde_yaml::Value::Number(n) => {
                let packed = n
                    .as_u64()
                    .ok_or_else(|| ColorError::Invalid(n.to_string()))?;
                Self::from_packed(packed)
            }
            serde_yaml::Value::String(s) => Self::parse_str(s),
            other => Err(ColorError::Invalid(format!("{:?}", other))),
        }
    }

    /// Parses `#rgb`, `#rrggbb`, or a decimal integer string.
    pub fn parse_str(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let packed = s
            .parse::<u64>()
            .map_err(|_| ColorError::Invalid(s.to_string()))?;
        Self::from_packed(packed)
    }

    fn from_packed(packed: u64) -> Result<Self, ColorError> {
        if packed > 0xff_ffff {
            return Err(ColorError::OutOfRange(packed));
        }
        Ok(ColorValue::Int(packed as u32))
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }

        match hex.len() {
            // #rgb -> #rrggbb
            3 => Ok(ColorValue::Rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(ColorValue::Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Converts to RGBA with the given alpha.
    pub fn to_rgba(&self, alpha: f64) -> Rgba {
        match *self {
            ColorValue::Int(packed) => Rgba::new(
                ((packed >> 16) & 0xff) as u8,
                ((packed >> 8) & 0xff) as u8,
                (packed & 0xff) as u8,
                alpha,
            ),
            ColorValue::Rgb(r, g, b) => Rgba::new(r, g, b, alpha),
        }
    }
}

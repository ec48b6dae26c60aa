//! Meta-style sheets: named four-variant bundles loaded from YAML.
//!
//! # Format
//!
//! ```yaml
//! roads:
//!   normal:
//!     stroke: { color: "#333333", weight: 2, line_cap: none }
//!   unselected:
//!     fade: 0.3                # normal, with alpha scaled
//!   selected: selection-halo   # shadow derived from normal's stroke
//!   probed: probe-halo         # two-ring halo derived from normal's stroke
//!
//! regions:
//!   normal:
//!     - fill: { color: 16711680, alpha: 0.5 }
//!     - stroke: { color: "#000" }
//!   selected:
//!     replace: true
//!     fill: { color: "#ff0" }
//!
//! highways: roads              # alias
//! ```
//!
//! A variant is a descriptor mapping (`fill`, `stroke`, `z_index`,
//! `replace`), a sequence of descriptor mappings, one of the presets
//! `selection-halo` / `probe-halo`, or `{ fade: <factor> }`.
//!
//! # Example
//!
//! ```rust
//! use metastyle::MetaStyleSheet;
//! use metastyle::style::MetaStyleKind;
//!
//! let sheet = MetaStyleSheet::from_yaml(r##"
//! roads:
//!   normal:
//!     stroke: { color: "#333", weight: 2 }
//!   probed: probe-halo
//! highways: roads
//! "##).unwrap();
//!
//! let styles = sheet.get("highways").unwrap();
//! assert_eq!(styles.get(MetaStyleKind::Probed).unwrap().descriptors().len(), 2);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Result, StylesheetError};
use crate::style::{
    probe_halo, selection_halo, ColorValue, FillSpec, LineCap, LineJoin, MetaStyleKind,
    MetaStyles, Stroke, StrokeSpec, StyleDescriptor, StyleVariant,
};

const SELECTION_HALO: &str = "selection-halo";
const PROBE_HALO: &str = "probe-halo";

/// A collection of named meta-style bundles and aliases between them.
#[derive(Debug, Clone, Default)]
pub struct MetaStyleSheet {
    name: Option<String>,
    source_path: Option<PathBuf>,
    bundles: HashMap<String, MetaStyles>,
    aliases: HashMap<String, String>,
}

impl MetaStyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stylesheet from YAML and validates its aliases.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|e| StylesheetError::Parse {
            message: e.to_string(),
        })?;

        let mut sheet = Self::new();
        let entries = match root {
            Value::Null => return Ok(sheet),
            Value::Mapping(map) => map,
            _ => {
                return Err(StylesheetError::Parse {
                    message: "stylesheet root must be a mapping".to_string(),
                })
            }
        };

        for (key, value) in &entries {
            let name = key.as_str().ok_or_else(|| StylesheetError::Parse {
                message: format!("bundle names must be strings, got {:?}", key),
            })?;

            match value {
                Value::String(target) => {
                    sheet.aliases.insert(name.to_string(), target.trim().to_string());
                }
                Value::Mapping(map) => {
                    sheet.bundles.insert(name.to_string(), parse_bundle(name, map)?);
                }
                other => {
                    return Err(StylesheetError::InvalidDefinition {
                        bundle: name.to_string(),
                        message: format!("expected an alias or a mapping, got {:?}", other),
                    })
                }
            }
        }

        sheet.validate()?;
        Ok(sheet)
    }

    /// Loads a stylesheet file. The sheet is named after the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StylesheetError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sheet = Self::from_yaml(&content)?;
        sheet.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Adds a bundle, returning `self` for chaining.
    pub fn add(mut self, name: impl Into<String>, styles: MetaStyles) -> Self {
        self.bundles.insert(name.into(), styles);
        self
    }

    /// Adds an alias, returning `self` for chaining.
    pub fn add_alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), target.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Looks up a bundle by name, following aliases.
    pub fn get(&self, name: &str) -> Option<&MetaStyles> {
        let mut current = name;
        // A valid chain visits each alias at most once.
        for _ in 0..=self.aliases.len() {
            if let Some(styles) = self.bundles.get(current) {
                return Some(styles);
            }
            current = self.aliases.get(current)?;
        }
        None
    }

    /// All bundle and alias names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .bundles
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bundles.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty() && self.aliases.is_empty()
    }

    /// Checks that every alias chain ends at a bundle.
    pub fn validate(&self) -> Result<()> {
        for (name, target) in &self.aliases {
            self.validate_alias_chain(name, target)?;
        }
        Ok(())
    }

    fn validate_alias_chain(&self, name: &str, target: &str) -> Result<()> {
        let mut path = vec![name.to_string()];
        let mut current = target;

        loop {
            if path.iter().any(|seen| seen == current) {
                path.push(current.to_string());
                return Err(StylesheetError::CycleDetected { path });
            }
            path.push(current.to_string());

            if self.bundles.contains_key(current) {
                return Ok(());
            }

            match self.aliases.get(current) {
                Some(next) => current = next,
                None => {
                    return Err(StylesheetError::UnresolvedAlias {
                        from: path[path.len() - 2].clone(),
                        to: current.to_string(),
                    })
                }
            }
        }
    }
}

fn parse_bundle(bundle: &str, map: &Mapping) -> Result<MetaStyles> {
    let mut slots: HashMap<MetaStyleKind, &Value> = HashMap::new();
    for (key, value) in map {
        let kind = key
            .as_str()
            .and_then(MetaStyleKind::from_name)
            .ok_or_else(|| StylesheetError::UnknownAttribute {
                bundle: bundle.to_string(),
                attribute: key_name(key),
            })?;
        slots.insert(kind, value);
    }

    let mut styles = MetaStyles::new();

    // Derived variants read from `normal`, so it goes first.
    if let Some(value) = slots.get(&MetaStyleKind::Normal) {
        let ctx = SlotContext::new(bundle, MetaStyleKind::Normal);
        styles.normal = Some(ctx.parse_variant(value, None)?);
    }

    for kind in [
        MetaStyleKind::Unselected,
        MetaStyleKind::Selected,
        MetaStyleKind::Probed,
    ] {
        if let Some(value) = slots.get(&kind) {
            let ctx = SlotContext::new(bundle, kind);
            let variant = ctx.parse_variant(value, styles.normal.as_ref())?;
            styles.set(kind, Some(variant));
        }
    }

    Ok(styles)
}

fn key_name(key: &Value) -> String {
    key.as_str()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:?}", key))
}

/// Where in the sheet a value is being parsed, for error messages.
struct SlotContext<'a> {
    bundle: &'a str,
    kind: MetaStyleKind,
}

impl<'a> SlotContext<'a> {
    fn new(bundle: &'a str, kind: MetaStyleKind) -> Self {
        Self { bundle, kind }
    }

    fn invalid(&self, message: impl Into<String>) -> StylesheetError {
        StylesheetError::InvalidDefinition {
            bundle: self.bundle.to_string(),
            message: format!("{}: {}", self.kind.name(), message.into()),
        }
    }

    fn unknown(&self, attribute: &Value) -> StylesheetError {
        StylesheetError::UnknownAttribute {
            bundle: self.bundle.to_string(),
            attribute: format!("{}.{}", self.kind.name(), key_name(attribute)),
        }
    }

    fn parse_variant(&self, value: &Value, normal: Option<&StyleVariant>) -> Result<StyleVariant> {
        match value {
            Value::String(preset) => self.parse_preset(preset.trim(), normal),
            Value::Mapping(map) if map.contains_key("fade") => self.parse_fade(map, normal),
            Value::Mapping(map) => {
                let (descriptor, replace) = self.parse_descriptor(map)?;
                Ok(if replace {
                    StyleVariant::Replace(descriptor)
                } else {
                    StyleVariant::Append(vec![descriptor])
                })
            }
            Value::Sequence(items) => {
                if items.is_empty() {
                    return Err(self.invalid("style sequence must not be empty"));
                }
                let mut descriptors = Vec::with_capacity(items.len());
                for item in items {
                    let map = item
                        .as_mapping()
                        .ok_or_else(|| self.invalid("sequence entries must be mappings"))?;
                    let (descriptor, replace) = self.parse_descriptor(map)?;
                    if replace {
                        return Err(self.invalid("'replace' is not allowed inside a sequence"));
                    }
                    descriptors.push(descriptor);
                }
                Ok(StyleVariant::Append(descriptors))
            }
            other => Err(self.invalid(format!("unsupported value {:?}", other))),
        }
    }

    fn parse_preset(&self, preset: &str, normal: Option<&StyleVariant>) -> Result<StyleVariant> {
        let halo: fn(&Stroke) -> Vec<StyleDescriptor> = match preset {
            SELECTION_HALO => selection_halo,
            PROBE_HALO => probe_halo,
            _ => return Err(self.invalid(format!("unknown preset '{}'", preset))),
        };

        let base = normal
            .and_then(|variant| variant.descriptors().iter().find_map(|d| d.stroke))
            .ok_or_else(|| self.invalid(format!("'{}' needs a stroke in normal", preset)))?;

        Ok(StyleVariant::Append(halo(&base)))
    }

    fn parse_fade(&self, map: &Mapping, normal: Option<&StyleVariant>) -> Result<StyleVariant> {
        if map.len() != 1 {
            return Err(self.invalid("'fade' cannot be combined with other attributes"));
        }
        let factor = map
            .get("fade")
            .and_then(Value::as_f64)
            .ok_or_else(|| self.invalid("'fade' must be a number"))?;
        if !(0.0..=1.0).contains(&factor) {
            return Err(self.invalid(format!("'fade' must be between 0 and 1, got {}", factor)));
        }
        let normal = normal.ok_or_else(|| self.invalid("'fade' needs a normal style"))?;
        Ok(normal.faded(factor))
    }

    /// Parses one descriptor mapping, returning it with its `replace` flag.
    fn parse_descriptor(&self, map: &Mapping) -> Result<(StyleDescriptor, bool)> {
        let mut descriptor = StyleDescriptor::null();
        let mut replace = false;

        for (key, value) in map {
            match key.as_str() {
                Some("fill") => {
                    let spec = self.parse_fill(self.expect_mapping(value, "fill")?)?;
                    descriptor.fill = Some(spec.to_fill(1.0));
                }
                Some("stroke") => {
                    let spec = self.parse_stroke(self.expect_mapping(value, "stroke")?)?;
                    descriptor.stroke = Some(spec.to_stroke(1.0));
                }
                Some("z_index") => {
                    let z = value
                        .as_i64()
                        .ok_or_else(|| self.invalid("'z_index' must be an integer"))?;
                    descriptor.z_index = Some(z);
                }
                Some("replace") => {
                    replace = value
                        .as_bool()
                        .ok_or_else(|| self.invalid("'replace' must be a boolean"))?;
                }
                _ => return Err(self.unknown(key)),
            }
        }

        Ok((descriptor, replace))
    }

    fn parse_fill(&self, map: &Mapping) -> Result<FillSpec> {
        let mut spec = FillSpec::default();
        for (key, value) in map {
            match key.as_str() {
                Some("color") => spec.color = self.parse_color(value)?,
                Some("alpha") => spec.alpha = self.number(value, "alpha")?,
                _ => return Err(self.unknown(key)),
            }
        }
        Ok(spec)
    }

    fn parse_stroke(&self, map: &Mapping) -> Result<StrokeSpec> {
        let mut spec = StrokeSpec::default();
        for (key, value) in map {
            match key.as_str() {
                Some("color") => spec.color = self.parse_color(value)?,
                Some("alpha") => spec.alpha = self.number(value, "alpha")?,
                Some("weight") => spec.weight = self.number(value, "weight")?,
                Some("miter_limit") => spec.miter_limit = Some(self.number(value, "miter_limit")?),
                Some("line_cap") => {
                    spec.line_cap = match value {
                        Value::Null => None,
                        _ => Some(
                            value
                                .as_str()
                                .and_then(LineCap::parse)
                                .ok_or_else(|| self.invalid(format!("bad line_cap {:?}", value)))?,
                        ),
                    }
                }
                Some("line_join") => {
                    spec.line_join = match value {
                        Value::Null => None,
                        _ => Some(
                            value
                                .as_str()
                                .and_then(LineJoin::parse)
                                .ok_or_else(|| self.invalid(format!("bad line_join {:?}", value)))?,
                        ),
                    }
                }
                _ => return Err(self.unknown(key)),
            }
        }
        Ok(spec)
    }

    fn parse_color(&self, value: &Value) -> Result<Option<ColorValue>> {
        if value.is_null() {
            return Ok(None);
        }
        ColorValue::parse_value(value)
            .map(Some)
            .map_err(|source| StylesheetError::InvalidColor {
                bundle: self.bundle.to_string(),
                slot: self.kind.name().to_string(),
                source,
            })
    }

    fn number(&self, value: &Value, field: &str) -> Result<f64> {
        value
            .as_f64()
            .ok_or_else(|| self.invalid(format!("'{}' must be a number", field)))
    }

    fn expect_mapping<'v>(&self, value: &'v Value, field: &str) -> Result<&'v Mapping> {
        value
            .as_mapping()
            .ok_or_else(|| self.invalid(format!("'{}' must be a mapping", field)))
    }
}

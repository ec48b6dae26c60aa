//! Formatting resolved layers for the terminal, JSON and YAML.

use std::fmt::Write as _;

use console::Style;
use serde::Serialize;

use metastyle::style::{Rgba, StyleDescriptor, StyleStack, ZOrder};
use metastyle::FeatureLayer;

use crate::cli::Format;

#[derive(Debug, Serialize)]
struct ResolvedFeature<'a> {
    key: &'a str,
    z_index: Option<i64>,
    stack: &'a StyleStack,
}

/// Renders every feature of `layer`, sorted by key.
pub fn render_layer(layer: &FeatureLayer<String>, format: Format) -> anyhow::Result<String> {
    let mut resolved: Vec<ResolvedFeature<'_>> = layer
        .features()
        .filter_map(|f| {
            layer.style(&f.key).map(|stack| ResolvedFeature {
                key: &f.key,
                z_index: stack.z_index(),
                stack,
            })
        })
        .collect();
    resolved.sort_by(|a, b| a.key.cmp(b.key));

    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&resolved)? + "\n"),
        Format::Yaml => Ok(serde_yaml::to_string(&resolved)?),
        Format::Text => Ok(render_text(&resolved)),
    }
}

fn render_text(resolved: &[ResolvedFeature<'_>]) -> String {
    let key_style = Style::new().bold();
    let width = resolved.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let mut out = String::new();

    for r in resolved {
        let _ = writeln!(
            out,
            "{}  z={}  {}",
            key_style.apply_to(format!("{:<width$}", r.key)),
            z_label(r.z_index),
            layer_count(r.stack)
        );
        for descriptor in r.stack.descriptors() {
            let _ = writeln!(out, "    {}", describe(descriptor));
        }
    }
    out
}

fn layer_count(stack: &StyleStack) -> String {
    if stack.is_null() {
        "hidden".to_string()
    } else if stack.len() == 1 {
        "1 layer".to_string()
    } else {
        format!("{} layers", stack.len())
    }
}

/// Names the reserved z-indices instead of printing huge numbers.
fn z_label(z_index: Option<i64>) -> String {
    match z_index {
        None => "-".to_string(),
        Some(ZOrder::PROBED) => "probed".to_string(),
        Some(ZOrder::PROBE_HALO_INNER) => "probe-halo-inner".to_string(),
        Some(ZOrder::PROBE_HALO_OUTER) => "probe-halo-outer".to_string(),
        Some(ZOrder::SELECTED) => "selected".to_string(),
        Some(ZOrder::SELECTION_HALO) => "selection-halo".to_string(),
        Some(z) => z.to_string(),
    }
}

fn describe(descriptor: &StyleDescriptor) -> String {
    if descriptor.is_null() {
        return format!("(null) z={}", z_label(descriptor.z_index));
    }

    let mut parts = Vec::new();
    if let Some(fill) = descriptor.fill {
        parts.push(format!("fill {} {}", swatch(fill.color), fill.color));
    }
    if let Some(stroke) = descriptor.stroke {
        parts.push(format!(
            "stroke {} {} width={}",
            swatch(stroke.color),
            stroke.color,
            stroke.width
        ));
    }
    if descriptor.z_index.is_some() {
        parts.push(format!("z={}", z_label(descriptor.z_index)));
    }
    parts.join("  ")
}

fn swatch(color: Rgba) -> String {
    Style::new()
        .color256(rgb_to_ansi256(color.rgb()))
        .apply_to("██")
        .to_string()
}

/// Nearest ANSI 256-colour palette index for an RGB triplet.
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

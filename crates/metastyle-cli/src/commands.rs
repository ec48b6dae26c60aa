//! Subcommand implementations. Each returns the text to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use metastyle::MetaStyleSheet;

use crate::cli::Format;
use crate::output::render_layer;
use crate::scene::Scene;

pub fn run_resolve(scene_path: &Path, format: Format) -> anyhow::Result<String> {
    let scene = Scene::load(scene_path)?;
    let sheet_path = scene.stylesheet_path(scene_path);
    debug!(stylesheet = %sheet_path.display(), "loading stylesheet");

    let sheet = MetaStyleSheet::from_file(&sheet_path)
        .with_context(|| format!("while loading scene {}", scene_path.display()))?;
    let layer = scene.build_layer(&sheet)?;
    render_layer(&layer, format)
}

pub fn run_check(path: &Path) -> anyhow::Result<String> {
    let sheet = MetaStyleSheet::from_file(path)?;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {} bundle(s)",
        sheet.name().unwrap_or("stylesheet"),
        sheet.len()
    );
    for name in sheet.names() {
        if sheet.is_alias(name) {
            let _ = writeln!(out, "  {} (alias)", name);
        } else {
            let _ = writeln!(out, "  {}", name);
        }
    }
    Ok(out)
}

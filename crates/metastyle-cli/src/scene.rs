//! Scene files: a stylesheet, a set of features and a session snapshot.
//!
//! ```yaml
//! stylesheet: styles.yaml     # relative to the scene file
//! selectable: true
//! selection: [lot-1]
//! probe: [lot-2]
//! filter: [lot-1, lot-2]      # omit to include every feature
//! features:
//!   - { key: lot-1, style: parcels, z_order: 2 }
//!   - { key: lot-2, style: parcels }
//!   - { key: lot-3, style: parcels }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::{debug, info};

use metastyle::{Feature, FeatureLayer, Filter, MetaStyleSheet};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub stylesheet: PathBuf,
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub probe: Vec<String>,
    #[serde(default)]
    pub filter: Option<Vec<String>>,
    pub features: Vec<SceneFeature>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFeature {
    pub key: String,
    pub style: String,
    #[serde(default)]
    pub z_order: Option<i64>,
}

fn default_selectable() -> bool {
    true
}

impl Scene {
    /// Reads a scene file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let scene = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid scene {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid scene {}", path.display()))?
        };
        Ok(scene)
    }

    /// The stylesheet path, resolved against the scene file's directory.
    pub fn stylesheet_path(&self, scene_path: &Path) -> PathBuf {
        match scene_path.parent() {
            Some(dir) if self.stylesheet.is_relative() => dir.join(&self.stylesheet),
            _ => self.stylesheet.clone(),
        }
    }

    /// Builds a layer holding every feature with the scene's session state
    /// applied and all styles resolved.
    pub fn build_layer(&self, sheet: &MetaStyleSheet) -> anyhow::Result<FeatureLayer<String>> {
        let mut layer = FeatureLayer::new();

        for entry in &self.features {
            let styles = sheet.get(&entry.style).ok_or_else(|| {
                anyhow!(
                    "feature '{}' uses unknown style '{}'",
                    entry.key,
                    entry.style
                )
            })?;

            let mut feature = Feature::new(entry.key.clone()).with_styles(styles.clone());
            feature.z_order = entry.z_order;
            layer.add_feature(feature);
        }

        layer.set_selectable(self.selectable);
        layer.set_selection(self.selection.iter().cloned().collect());
        layer.set_probe(self.probe.iter().cloned().collect());
        if let Some(keys) = &self.filter {
            layer.set_filter(keys.iter().cloned().collect::<Filter<String>>());
        }

        debug!(pending = ?layer.pending(), "applying session state");
        let resolved = layer.flush();
        info!(
            features = layer.len(),
            resolved,
            selected = self.selection.len(),
            probed = self.probe.len(),
            "scene resolved"
        );
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metastyle::style::ZOrder;

    const SHEET: &str = r##"
parcels:
  normal:
    stroke: { color: "#222", weight: 1 }
  unselected:
    fade: 0.5
  selected: selection-halo
  probed: probe-halo
"##;

    fn scene(yaml: &str) -> Scene {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = scene("stylesheet: s.yaml\nfeatures: []\n");
        assert!(s.selectable);
        assert!(s.selection.is_empty());
        assert_eq!(s.filter, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Scene, _> =
            serde_yaml::from_str("stylesheet: s.yaml\nfeatures: []\nhover: [a]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_stylesheet_path_is_relative_to_scene() {
        let s = scene("stylesheet: styles/s.yaml\nfeatures: []\n");
        assert_eq!(
            s.stylesheet_path(Path::new("/data/scene.yaml")),
            PathBuf::from("/data/styles/s.yaml")
        );
    }

    #[test]
    fn test_build_layer() {
        let sheet = MetaStyleSheet::from_yaml(SHEET).unwrap();
        let s = scene(
            r#"
stylesheet: s.yaml
selection: [a]
probe: [b]
filter: [a, b]
features:
  - { key: a, style: parcels, z_order: 4 }
  - { key: b, style: parcels }
  - { key: c, style: parcels }
"#,
        );

        let layer = s.build_layer(&sheet).unwrap();
        let z = |key: &str| layer.style(&key.to_string()).unwrap().z_index();

        assert_eq!(z("a"), Some(ZOrder::SELECTED));
        assert_eq!(z("b"), Some(ZOrder::PROBED));
        assert!(layer.style(&"c".to_string()).unwrap().is_null());
    }

    #[test]
    fn test_unknown_style_is_an_error() {
        let sheet = MetaStyleSheet::from_yaml(SHEET).unwrap();
        let s = scene("stylesheet: s.yaml\nfeatures:\n  - { key: a, style: roads }\n");
        let err = s.build_layer(&sheet).unwrap_err();
        assert!(err.to_string().contains("unknown style 'roads'"));
    }
}

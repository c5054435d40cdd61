//! Session configuration: join field names, style constants, side-panel text.
//! Every field has a default, so a partial JSON file is a valid config.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::election::record::ID_FIELD;
use crate::style::{RegionStyle, Rgb, NEUTRAL_GREY};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub join: JoinConfig,
    pub style: StyleConfig,
}

/// Field names used to match features to records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Feature property holding the region reference code.
    pub reference_field: String,
    /// Record column holding the region identifier.
    pub id_field: String,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            reference_field: "REF".to_string(),
            id_field: ID_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub fill_opacity: f64,
    pub stroke_color: Rgb,
    pub stroke_weight: f64,
    pub highlight_stroke_color: Rgb,
    pub highlight_stroke_weight: f64,
    pub highlight_fill_opacity: f64,
    /// Style of features with no matching record.
    pub unmatched: RegionStyle,
    /// Side-panel content while nothing is hovered.
    pub panel_placeholder: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_opacity: 0.7,
            stroke_color: Rgb::BLACK,
            stroke_weight: 1.0,
            highlight_stroke_color: Rgb::hex(0x666666),
            highlight_stroke_weight: 3.0,
            highlight_fill_opacity: 0.7,
            unmatched: RegionStyle {
                fill_color: NEUTRAL_GREY,
                fill_opacity: 1.0,
                stroke_color: Rgb::BLACK,
                stroke_weight: 1.0,
            },
            panel_placeholder: "<h4>Hover over a region</h4>".to_string(),
        }
    }
}

impl StyleConfig {
    /// Resting style for a given fill color.
    pub fn resting(&self, fill_color: Rgb) -> RegionStyle {
        RegionStyle {
            fill_color,
            fill_opacity: self.fill_opacity,
            stroke_color: self.stroke_color,
            stroke_weight: self.stroke_weight,
        }
    }

    /// Hover style derived from a resting style.
    pub fn highlight(&self, style: RegionStyle) -> RegionStyle {
        style.highlighted(self.highlight_stroke_color, self.highlight_stroke_weight, self.highlight_fill_opacity)
    }
}

impl Config {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let config = Config::from_json_str(r##"{
            "join": { "reference_field": "code_circ" },
            "style": { "highlight_stroke_color": "#ff0000" }
        }"##).unwrap();
        assert_eq!(config.join.reference_field, "code_circ");
        assert_eq!(config.join.id_field, "ID");
        assert_eq!(config.style.highlight_stroke_color, Rgb::hex(0xff0000));
        assert_eq!(config.style.fill_opacity, 0.7);
    }

    #[test]
    fn unmatched_fill_is_solid_grey() {
        let unmatched = Config::default().style.unmatched;
        assert_eq!(unmatched.fill_color, NEUTRAL_GREY);
        assert_eq!(unmatched.fill_opacity, 1.0);
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(Config::from_json_str(r#"{ "style": { "stroke_color": "black" } }"#).is_err());
    }

    #[test]
    fn reads_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "style": { "panel_placeholder": "<p>Survolez</p>" } }"#)?;
        assert_eq!(Config::from_json_file(&path)?.style.panel_placeholder, "<p>Survolez</p>");
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::style::Rgb;

/// Path style applied to one region by the renderer.
/// Field names follow the path options of web map libraries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    #[serde(rename = "fillColor")]
    pub fill_color: Rgb,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    #[serde(rename = "color")]
    pub stroke_color: Rgb,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
}

impl RegionStyle {
    /// The same style with its fill made transparent; the outline is kept.
    pub fn hidden(self) -> Self {
        Self { fill_opacity: 0.0, ..self }
    }

    /// The same fill with a hover outline.
    pub fn highlighted(self, stroke_color: Rgb, stroke_weight: f64, fill_opacity: f64) -> Self {
        Self { stroke_color, stroke_weight, fill_opacity, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: RegionStyle = RegionStyle {
        fill_color: Rgb::hex(0x123456),
        fill_opacity: 0.7,
        stroke_color: Rgb::BLACK,
        stroke_weight: 1.0,
    };

    #[test]
    fn hidden_keeps_everything_but_fill_opacity() {
        let hidden = BASE.hidden();
        assert_eq!(hidden.fill_opacity, 0.0);
        assert_eq!(hidden.fill_color, BASE.fill_color);
        assert_eq!(hidden.stroke_weight, BASE.stroke_weight);
    }

    #[test]
    fn highlighted_keeps_fill_color() {
        let hl = BASE.highlighted(Rgb::hex(0x666666), 3.0, 0.7);
        assert_eq!(hl.fill_color, BASE.fill_color);
        assert_eq!(hl.stroke_weight, 3.0);
        assert_eq!(hl.stroke_color, Rgb::hex(0x666666));
    }

    #[test]
    fn serializes_with_path_option_names() {
        let json = serde_json::to_value(BASE).unwrap();
        assert_eq!(json, serde_json::json!({
            "fillColor": "#123456", "fillOpacity": 0.7, "color": "#000000", "weight": 1.0,
        }));
    }
}

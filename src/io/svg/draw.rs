use std::io::Write;

use anyhow::{anyhow, Result};
use geo::{Coord, CoordsIter, LineString, MultiPolygon};
use tracing::debug;

use crate::io::svg::writer::SvgStringWriter;
use crate::join::{escape_html, popup_text};
use crate::map::GeoFeature;
use crate::session::Session;

/// Projection function: source coords -> SVG coords (x,y)
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Output size of an SVG export. Height follows from the map's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
    pub margin: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { width: 1200.0, margin: 10.0 }
    }
}

/// Render the session's current view: every region in paint order with its current
/// style, and a `<title>` carrying its identifier and popup text.
pub fn render_svg(session: &Session, features: &[GeoFeature], options: &SvgOptions) -> Result<String> {
    if features.len() != session.map().len() {
        return Err(anyhow!(
            "[io::svg] Feature count ({}) does not match region count ({})",
            features.len(),
            session.map().len(),
        ));
    }

    let bounds = session.map().extent()
        .ok_or_else(|| anyhow!("[io::svg] Could not determine bounds; nothing to draw."))?;

    let margin = options.margin;
    let width = options.width;
    let span = if bounds.width() > 0.0 { bounds.width() } else { bounds.height() };
    let scale = if span > 0.0 { (width - 2.0 * margin) / span } else { 1.0 };
    let height = bounds.height() * scale + 2.0 * margin;

    // Y axis points down in SVG.
    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min_x) * scale;
        let y = margin + (bounds.max_y - coord.y) * scale;
        (x, y)
    };

    let mut writer = SvgStringWriter::new();
    writer.write_header(width, height, margin, scale, &bounds)?;
    draw_regions(&mut writer, session, features, &project)?;
    writer.write_footer()?;

    debug!(regions = features.len(), width, height, "rendered svg");
    writer.into_string()
}

/// Render the session's current view to an `.svg` file.
#[cfg(feature = "files")]
pub fn write_svg(path: &std::path::Path, session: &Session, features: &[GeoFeature], options: &SvgOptions) -> Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::common::ensure_dir_exists(parent)?;
    }
    let svg = render_svg(session, features, options)?;
    std::fs::write(path, svg)
        .with_context(|| format!("[io::svg] Failed to write {}", path.display()))
}

fn draw_regions(writer: &mut impl Write, session: &Session, features: &[GeoFeature], project: &Projection) -> Result<()> {
    for &id in session.draw_order() {
        let Some(geometry) = features[id.index()].geometry() else { continue };
        let (Some(region), Some(style)) = (session.region(id), session.style(id)) else { continue };

        // Popup text is already escaped.
        let label = escape_html(&match &region.canonical_id {
            Some(canonical) => canonical.to_string(),
            None => region.winner.to_string(),
        });
        let title = match &region.popup {
            Some(popup) => format!("{label}\n{}", popup_text(popup)),
            None => label,
        };

        writeln!(
            writer,
            r#"<path id="region-{}" d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}" fill-rule="evenodd"><title>{}</title></path>"#,
            id.0,
            multipolygon_to_path(geometry, project),
            style.fill_color,
            style.fill_opacity,
            style.stroke_color,
            style.stroke_weight,
            title,
        )?;
    }
    Ok(())
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

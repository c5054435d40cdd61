//! ESRI shapefile reading (plain `.shp` or a `.zip` containing one).

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Number, Value};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{Reader, Shape};
use tracing::{debug, info};

use crate::common;
use crate::map::GeoFeature;

/// Read boundary features from a `.shp` file (with its `.dbf` alongside) or from a
/// `.zip` archive holding one. dBase attributes become feature properties.
pub(crate) fn read_shapefile_features(path: &Path) -> Result<Vec<GeoFeature>> {
    if common::has_extension(path, "zip") {
        let dir = tempfile::tempdir().context("[io::shp] Failed to create extraction directory")?;
        common::extract_zip(path, dir.path())?;
        let shp = common::find_file_with_extension(dir.path(), "shp")
            .ok_or_else(|| anyhow!("[io::shp] No .shp file inside {}", path.display()))?;
        debug!(archive = %path.display(), shapefile = %shp.display(), "extracted shapefile archive");
        return read_shp(&shp);
    }
    read_shp(path)
}

fn read_shp(path: &Path) -> Result<Vec<GeoFeature>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::with_capacity(reader.shape_count().unwrap_or(0));
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result
            .with_context(|| format!("[io::shp] Error reading shape+record in {}", path.display()))?;
        features.push(GeoFeature::new(record_to_properties(record), shape_to_multipolygon(shape)));
    }

    info!(path = %path.display(), features = features.len(), "loaded shapefile");
    Ok(features)
}

/// Convert dBase attributes to JSON scalars; text is trimmed of the dBase padding.
fn record_to_properties(record: Record) -> Map<String, Value> {
    record.into_iter()
        .map(|(name, value)| {
            let value = match value {
                FieldValue::Character(Some(s)) => Value::String(s.trim().to_string()),
                FieldValue::Memo(s) => Value::String(s),
                FieldValue::Numeric(Some(n)) | FieldValue::Double(n) | FieldValue::Currency(n) => number(n),
                FieldValue::Float(Some(n)) => number(n as f64),
                FieldValue::Integer(n) => Value::from(n),
                FieldValue::Logical(Some(b)) => Value::Bool(b),
                _ => Value::Null,
            };
            (name, value)
        })
        .collect()
}

fn number(x: f64) -> Value {
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}

/// Polygon shapes become multipolygons; anything else has no usable area.
fn shape_to_multipolygon(shape: Shape) -> Option<MultiPolygon<f64>> {
    let rings: Vec<Vec<Coord<f64>>> = match shape {
        Shape::Polygon(p) => p.rings().iter()
            .map(|ring| ring.points().iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect())
            .collect(),
        Shape::PolygonM(p) => p.rings().iter()
            .map(|ring| ring.points().iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect())
            .collect(),
        Shape::PolygonZ(p) => p.rings().iter()
            .map(|ring| ring.points().iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect())
            .collect(),
        _ => return None,
    };
    Some(rings_to_multipolygon(rings))
}

/// Group shapefile rings into polygons: each clockwise (exterior) ring starts a polygon
/// and the counter-clockwise rings after it are its holes.
pub(crate) fn rings_to_multipolygon(rings: Vec<Vec<Coord<f64>>>) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
    }

    /// Get the signed area of a ring (negative when clockwise)
    fn signed_area(pts: &[Coord<f64>]) -> f64 {
        pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
    }

    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for mut coords in rings.into_iter().filter(|r| r.len() >= 3) {
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        let ring = LineString(coords);
        if is_exterior {
            if let Some(ext) = exterior.take() {
                polys.push(Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ring);
        } else if exterior.is_some() {
            holes.push(ring);
        } else {
            // Counter-clockwise ring with no exterior before it: treat as its own polygon.
            polys.push(Polygon::new(ring, vec![]));
        }
    }
    if let Some(ext) = exterior {
        polys.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polys)
}

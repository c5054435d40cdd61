use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};
use tracing::debug;

use crate::map::GeoFeature;

/// Parse a GeoJSON FeatureCollection into boundary features.
/// Polygon and MultiPolygon geometries are kept; other geometry types load without geometry.
pub fn features_from_geojson(geojson: &Value) -> Result<Vec<GeoFeature>> {
    match geojson.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {}
        Some(other) => bail!("[io::geojson::read] Expected a FeatureCollection, found {other:?}"),
        None => bail!("[io::geojson::read] Missing \"type\" member"),
    }

    let features = geojson.get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("[io::geojson::read] FeatureCollection has no \"features\" array"))?;

    features.iter().enumerate()
        .map(|(i, feature)| {
            feature_from_geojson(feature)
                .with_context(|| format!("[io::geojson::read] Invalid feature at index {i}"))
        })
        .collect()
}

/// Parse GeoJSON text.
pub fn features_from_geojson_str(text: &str) -> Result<Vec<GeoFeature>> {
    let value: Value = serde_json::from_str(text)
        .context("[io::geojson::read] Failed to parse GeoJSON")?;
    features_from_geojson(&value)
}

fn feature_from_geojson(feature: &Value) -> Result<GeoFeature> {
    let properties = match feature.get("properties") {
        Some(Value::Object(props)) => props.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(_) => bail!("\"properties\" must be an object or null"),
    };

    let geometry = match feature.get("geometry") {
        Some(Value::Null) | None => None,
        Some(geometry) => geometry_to_multipolygon(geometry)?,
    };

    Ok(GeoFeature::new(properties, geometry))
}

fn geometry_to_multipolygon(geometry: &Value) -> Result<Option<MultiPolygon<f64>>> {
    let kind = geometry.get("type").and_then(Value::as_str)
        .ok_or_else(|| anyhow!("geometry has no \"type\""))?;
    let coordinates = geometry.get("coordinates");

    match kind {
        "Polygon" => {
            let rings = coordinates.ok_or_else(|| anyhow!("Polygon has no coordinates"))?;
            Ok(Some(MultiPolygon(vec![parse_polygon(rings)?])))
        }
        "MultiPolygon" => {
            let polygons = coordinates.and_then(Value::as_array)
                .ok_or_else(|| anyhow!("MultiPolygon coordinates must be an array"))?;
            Ok(Some(MultiPolygon(polygons.iter().map(parse_polygon).collect::<Result<_>>()?)))
        }
        other => {
            debug!(geometry = other, "ignoring non-areal geometry");
            Ok(None)
        }
    }
}

fn parse_polygon(rings: &Value) -> Result<Polygon<f64>> {
    let mut rings = rings.as_array()
        .ok_or_else(|| anyhow!("polygon must be an array of rings"))?
        .iter()
        .map(parse_ring);
    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(ring: &Value) -> Result<LineString<f64>> {
    ring.as_array()
        .ok_or_else(|| anyhow!("ring must be an array of positions"))?
        .iter()
        .map(|position| {
            let xy = position.as_array()
                .filter(|p| p.len() >= 2)
                .ok_or_else(|| anyhow!("position must have at least two numbers"))?;
            let coord = |v: &Value| v.as_f64().ok_or_else(|| anyhow!("position members must be numbers"));
            Ok(Coord { x: coord(&xy[0])?, y: coord(&xy[1])? })
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

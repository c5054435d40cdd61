use anyhow::{anyhow, Result};
use geo::{LineString, MultiPolygon};
use serde_json::{json, Value};

use crate::map::{FeatureId, GeoFeature};
use crate::session::Session;

/// Export the session's current view as a GeoJSON FeatureCollection.
///
/// Each feature keeps its source properties and gains the join and interaction state
/// (`style`, `state`, `matched`, `winner`, `popup`). Features are written in paint
/// order, so a renderer drawing them in sequence reproduces the stacking.
pub fn session_to_geojson(session: &Session, features: &[GeoFeature]) -> Result<Value> {
    if features.len() != session.map().len() {
        return Err(anyhow!(
            "[io::geojson::write] Feature count ({}) does not match region count ({})",
            features.len(),
            session.map().len(),
        ));
    }

    let out = session.draw_order().iter()
        .map(|&id| feature_to_geojson(session, id, &features[id.index()]))
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": out,
    }))
}

fn feature_to_geojson(session: &Session, id: FeatureId, feature: &GeoFeature) -> Result<Value> {
    let region = session.region(id)
        .ok_or_else(|| anyhow!("[io::geojson::write] No region for {id}"))?;

    let mut properties = feature.properties().clone();
    properties.insert("style".to_string(), serde_json::to_value(session.style(id))?);
    properties.insert("state".to_string(), serde_json::to_value(session.state(id))?);
    properties.insert("matched".to_string(), json!(region.matched));
    properties.insert("winner".to_string(), serde_json::to_value(&region.winner)?);
    properties.insert("popup".to_string(), json!(region.popup));

    Ok(json!({
        "type": "Feature",
        "id": id,
        "geometry": feature.geometry().map(multipolygon_to_geojson),
        "properties": properties,
    }))
}

fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let ring = |ls: &LineString<f64>| ls.0.iter().map(|c| json!([c.x, c.y])).collect::<Vec<_>>();
    let polygons = mp.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    json!({ "type": "MultiPolygon", "coordinates": polygons })
}

/// Write the session's current view to a `.geojson` file.
#[cfg(feature = "files")]
pub fn write_geojson(path: &std::path::Path, session: &Session, features: &[GeoFeature]) -> Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::common::ensure_dir_exists(parent)?;
    }
    let value = session_to_geojson(session, features)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("[io::geojson::write] Failed to create {}", path.display()))?;
    serde_json::to_writer(std::io::BufWriter::new(file), &value)
        .with_context(|| format!("[io::geojson::write] Failed to write {}", path.display()))
}

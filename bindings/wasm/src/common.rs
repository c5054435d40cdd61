use anyhow::{anyhow, Result};
use serde::Serialize;
use wasm_bindgen::JsValue;

use electomap_core::{ElectionRecord, GeoFeature};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize to plain JS objects (not `Map`s), so effects read like JSON.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.into())
}

/// Parse a GeoJSON FeatureCollection given as a JS object.
pub(crate) fn js_to_features(geojson: JsValue) -> Result<Vec<GeoFeature>> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(geojson)
        .map_err(|e| anyhow!("boundaries must be a GeoJSON object: {e}"))?;
    electomap_core::io::features_from_geojson(&value)
}

/// Parse results given as a JS array of row objects.
pub(crate) fn js_to_records(records: JsValue) -> Result<Vec<ElectionRecord>> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(records)
        .map_err(|e| anyhow!("results must be an array of objects: {e}"))?;
    electomap_core::io::records_from_json(&value)
}

pub(crate) fn parse_config(config: Option<JsValue>) -> Result<electomap_core::Config> {
    match config {
        Some(config) if !config.is_undefined() && !config.is_null() => serde_wasm_bindgen::from_value(config)
            .map_err(|e| anyhow!("invalid config: {e}")),
        _ => Ok(electomap_core::Config::default()),
    }
}

use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use electomap_core::{io, join, Effect, FeatureId, Filter, GeoFeature, Session};

use crate::{WasmLoaded, common::*};

/// Interactive choropleth state. Every event method returns the array of effects
/// the map renderer has to apply, in order.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
    features: Vec<GeoFeature>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Join a GeoJSON FeatureCollection with an array of result rows and start a session.
    #[wasm_bindgen(constructor)]
    pub fn new(boundaries: JsValue, results: JsValue, config: Option<JsValue>) -> Result<WasmSession, JsValue> {
        let config = parse_config(config).map_err(js_err)?;
        let features = js_to_features(boundaries).map_err(js_err)?;
        let records = js_to_records(results).map_err(js_err)?;
        let map = join(&features, &records, &config.join, &config.style);
        Ok(WasmSession { inner: Session::new(map, config.style), features })
    }

    /// Start a session from a completed load cycle.
    pub fn from_loaded(loaded: WasmLoaded) -> WasmSession {
        let electomap_core::Loaded { features, map, .. } = loaded.inner;
        WasmSession { inner: Session::new(map, loaded.style), features }
    }

    /// Swap in newer data, keeping the current filter.
    pub fn replace(&mut self, loaded: WasmLoaded) -> Result<JsValue, JsValue> {
        let electomap_core::Loaded { features, map, .. } = loaded.inner;
        self.features = features;
        effects(self.inner.replace(map))
    }

    pub fn len(&self) -> u32 {
        self.inner.map().len() as u32
    }

    /// "all" (or empty) shows every region; a party code shows only its wins.
    pub fn set_filter(&mut self, selection: &str) -> Result<JsValue, JsValue> {
        effects(self.inner.set_filter(Filter::parse(selection)))
    }

    pub fn filter(&self) -> String {
        self.inner.filter().to_string()
    }

    pub fn hover_enter(&mut self, id: u32) -> Result<JsValue, JsValue> {
        effects(self.inner.hover_enter(FeatureId(id)))
    }

    pub fn hover_exit(&mut self, id: u32) -> Result<JsValue, JsValue> {
        effects(self.inner.hover_exit(FeatureId(id)))
    }

    pub fn click(&self, id: u32) -> Result<JsValue, JsValue> {
        effects(self.inner.click(FeatureId(id)))
    }

    /// Effects that redraw everything from scratch.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        effects(self.inner.snapshot())
    }

    pub fn panel(&self) -> String {
        self.inner.panel().to_string()
    }

    /// Current style of a region, or `undefined` for an unknown id.
    pub fn style(&self, id: u32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.style(FeatureId(id)))
    }

    /// View model of a region (winner, shares, popup, ...).
    pub fn region(&self, id: u32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.region(FeatureId(id)))
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.map().report())
    }

    /// Current view as a styled GeoJSON FeatureCollection.
    #[wasm_bindgen(js_name = "to_geojson")]
    pub fn to_geojson(&self) -> Result<JsValue, JsValue> {
        let value = io::session_to_geojson(&self.inner, &self.features).map_err(js_err)?;
        to_js(&value)
    }

    /// Current view as SVG text.
    #[wasm_bindgen(js_name = "to_svg")]
    pub fn to_svg(&self, width: Option<f64>) -> Result<String, JsValue> {
        let mut options = io::SvgOptions::default();
        if let Some(width) = width { options.width = width }
        io::render_svg(&self.inner, &self.features, &options).map_err(js_err)
    }
}

fn effects(effects: Vec<Effect>) -> Result<JsValue, JsValue> {
    to_js(&effects)
}

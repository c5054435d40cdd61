use js_sys::Promise;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use electomap_core::StyleConfig;

use crate::common::*;

/// Runs load cycles from two JS promises (boundaries and results).
/// A cycle overtaken by a newer `load` call resolves to `undefined`.
#[wasm_bindgen]
pub struct WasmLoader {
    inner: electomap_core::Loader,
}

/// Joined data of one completed load cycle, ready to start or refresh a session.
#[wasm_bindgen]
pub struct WasmLoaded {
    pub(crate) inner: electomap_core::Loaded,
    pub(crate) style: StyleConfig,
}

#[wasm_bindgen]
impl WasmLoader {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<WasmLoader, JsValue> {
        Ok(WasmLoader { inner: electomap_core::Loader::new(parse_config(config).map_err(js_err)?) })
    }

    /// Await both inputs, then join once. The returned promise resolves to a
    /// `WasmLoaded`, or to `undefined` if a newer load superseded this one.
    pub fn load(&self, boundaries: Promise, results: Promise) -> Promise {
        let loader = self.inner.clone();
        future_to_promise(async move {
            let boundaries = async {
                let value = JsFuture::from(boundaries).await
                    .map_err(|e| anyhow::anyhow!("boundary request failed: {e:?}"))?;
                js_to_features(value)
            };
            let results = async {
                let value = JsFuture::from(results).await
                    .map_err(|e| anyhow::anyhow!("results request failed: {e:?}"))?;
                js_to_records(value)
            };

            let outcome = loader.load(boundaries, results).await
                .inspect_err(|e| web_sys::console::error_1(&JsValue::from_str(&e.to_string())))
                .map_err(js_err)?;
            let style = loader.config().style.clone();
            Ok(outcome.ready()
                .map(|inner| JsValue::from(WasmLoaded { inner, style }))
                .unwrap_or(JsValue::UNDEFINED))
        })
    }

    pub fn latest_generation(&self) -> f64 {
        self.inner.latest_generation() as f64
    }
}

#[wasm_bindgen]
impl WasmLoaded {
    pub fn generation(&self) -> f64 {
        self.inner.generation as f64
    }

    /// Join diagnostics as a JS object.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.map.report())
    }
}

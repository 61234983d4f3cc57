//! WASM bindings for the displace-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Data crosses the boundary as JSON strings: features as GeoJSON-like
//! objects, configuration as camelCase options.

use wasm_bindgen::prelude::*;

use crate::config::DisplacementConfig;
use crate::diagnostics::{DiagnosticEvent, DiagnosticHook};
use crate::displacement::{DisplacedPoints, displace as displace_features};
use crate::error::DisplaceError;
use crate::feature::Feature;
use crate::output::LayerOutput;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Forwards refresh summaries to the browser console.
struct ConsoleHook;

impl DiagnosticHook for ConsoleHook {
    fn on_event(&self, event: &DiagnosticEvent) {
        if let DiagnosticEvent::Refreshed { .. } = event {
            console_log(&event.to_string());
        }
    }
}

fn parse_features(json: &str) -> Result<Vec<Feature>, DisplaceError> {
    Ok(serde_json::from_str(json)?)
}

fn report(result: Result<Vec<Feature>, DisplaceError>) -> String {
    if let Err(e) = &result {
        console_error(&format!("Displacement failed: {}", e));
    }
    LayerOutput::from_result(result).to_json()
}

/// A displaced points layer kept alive on the JavaScript side.
#[wasm_bindgen]
pub struct DisplacedPointsLayer {
    inner: DisplacedPoints,
}

#[wasm_bindgen]
impl DisplacedPointsLayer {
    /// Create a layer from a JSON options object. Throws on invalid options.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<DisplacedPointsLayer, JsValue> {
        DisplacementConfig::from_json(config_json)
            .and_then(|cfg| Ok(DisplacedPoints::new(cfg)?))
            .map(|inner| DisplacedPointsLayer { inner })
            .map_err(|e| {
                console_error(&format!("Invalid displacement options: {}", e));
                JsValue::from_str(&e.to_string())
            })
    }

    /// Recompute the layer for a JSON array of features at `resolution`
    /// (map units per pixel). Returns `{ "features": [...] }`, with an added
    /// `"error": {...}` and no features on failure.
    pub fn refresh(&mut self, features_json: &str, resolution: f64) -> String {
        let result = parse_features(features_json).and_then(|features| {
            self.inner.refresh(&features, &resolution)?;
            Ok(self.inner.all_features())
        });
        report(result)
    }

    /// Drop the published features.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Published features in draw order, as JSON.
    #[wasm_bindgen(js_name = allFeatures)]
    pub fn all_features(&self) -> String {
        LayerOutput::from_result(Ok(self.inner.all_features())).to_json()
    }

    /// Log refresh summaries to the console.
    #[wasm_bindgen(js_name = setDebug)]
    pub fn set_debug(&mut self, enabled: bool) {
        let hook: Option<Box<dyn DiagnosticHook>> = if enabled { Some(Box::new(ConsoleHook)) } else { None };
        self.inner.set_hook(hook);
    }
}

/// Stateless displacement: features JSON + options JSON + resolution in,
/// features JSON out.
#[wasm_bindgen]
pub fn displace(features_json: &str, config_json: &str, resolution: f64) -> String {
    let result = DisplacementConfig::from_json(config_json).and_then(|cfg| {
        let features = parse_features(features_json)?;
        displace_features(&features, &cfg, resolution)
    });
    report(result)
}

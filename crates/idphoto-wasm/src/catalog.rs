//! Catalog bindings for the document-type and paper-size selectors.
//!
//! Photo-count choices depend on the config and live on `JsEditorSession`.

use idphoto_core::spec::Catalog;
use wasm_bindgen::prelude::*;

/// All photo specifications, in selector order.
#[wasm_bindgen]
pub fn photo_specs() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(Catalog::builtin().photo_specs())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// All paper sizes, in selector order.
#[wasm_bindgen]
pub fn paper_specs() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(Catalog::builtin().paper_specs())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Names for the document-type selector.
#[wasm_bindgen]
pub fn photo_spec_names() -> Vec<String> {
    Catalog::builtin()
        .photo_specs()
        .iter()
        .map(|spec| spec.name.clone())
        .collect()
}

/// Names for the paper-size selector.
#[wasm_bindgen]
pub fn paper_names() -> Vec<String> {
    Catalog::builtin()
        .paper_specs()
        .iter()
        .map(|paper| paper.name.clone())
        .collect()
}

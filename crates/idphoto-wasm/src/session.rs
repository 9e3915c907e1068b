//! Editor session bindings.
//!
//! The browser front end owns one `JsEditorSession` and forwards its UI
//! events to it: file picked, drag, wheel tick, slider moved, selector
//! changed. Images come back as [`JsDecodedImage`] and exports as JPEG
//! bytes the page can offer for download.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditorSession(null);
//! const report = session.load_image(new Uint8Array(await file.arrayBuffer()));
//! if (report.warning) status.textContent = report.warning;
//!
//! canvas.onwheel = (e) => session.zoom_wheel(-e.deltaY);
//! const jpeg = session.export_photo_jpeg();
//! ```

use idphoto_core::config::EditorConfig;
use idphoto_core::guides::AdjustmentMode;
use idphoto_core::spec::Catalog;
use idphoto_core::EditorSession;
use wasm_bindgen::prelude::*;

use crate::types::{JsDecodedImage, JsLoadReport};

/// Editor state for the browser front end.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session. `config_json` may override any config field.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<JsEditorSession, JsValue> {
        let config = match config_json {
            Some(json) => {
                let mut config = EditorConfig::from_json_str(&json)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                for warning in config.sanitize() {
                    log::warn!("config: {}", warning);
                }
                config
            }
            None => EditorConfig::default(),
        };
        let inner = EditorSession::new(config, Catalog::builtin())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn select_photo_spec(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner
            .select_photo_spec(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn select_paper(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner
            .select_paper(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_photo_count(&mut self, count: u32) -> Result<(), JsValue> {
        self.inner
            .set_photo_count(count)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Switch between manual (guides shown) and auto mode.
    pub fn set_manual_mode(&mut self, manual: bool) {
        let mode = if manual {
            AdjustmentMode::Manual
        } else {
            AdjustmentMode::Auto
        };
        self.inner.set_mode(mode);
    }

    /// Label of the current adjustment mode.
    #[wasm_bindgen(getter)]
    pub fn mode_label(&self) -> String {
        self.inner.mode().label().to_string()
    }

    /// Decode JPEG or PNG bytes as the new source image.
    ///
    /// Returns `{ width, height, warning }` where `warning` is set for a
    /// source below the recommended resolution.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let report = self
            .inner
            .load_image(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&JsLoadReport::from(report))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Use pixels the page has already decoded as the new source image.
    ///
    /// Fails, keeping the current source, if the buffer length does not
    /// match the stated size.
    pub fn set_source_image(&mut self, image: &JsDecodedImage) -> Result<JsValue, JsValue> {
        let report = self
            .inner
            .set_source(image.to_decoded())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&JsLoadReport::from(report))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.inner.pan(dx, dy);
    }

    pub fn zoom_wheel(&mut self, delta: f64) {
        self.inner.zoom_wheel(delta);
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.view().scale
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.view().offset_x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.view().offset_y
    }

    /// Set brightness and contrast from slider positions (0.8 to 1.2).
    pub fn set_adjustments(&mut self, brightness: f32, contrast: f32) {
        self.inner.set_adjustments(brightness, contrast);
    }

    #[wasm_bindgen(getter)]
    pub fn target_width(&self) -> u32 {
        self.inner.target_px().0
    }

    #[wasm_bindgen(getter)]
    pub fn target_height(&self) -> u32 {
        self.inner.target_px().1
    }

    #[wasm_bindgen(getter)]
    pub fn photo_count(&self) -> u32 {
        self.inner.photo_count()
    }

    /// Choices for the photo-count selector, from this session's config.
    #[wasm_bindgen(getter)]
    pub fn photo_count_choices(&self) -> Vec<u32> {
        self.inner.config().photo_count_choices.clone()
    }

    /// Crop window and its four shaded overlay rectangles.
    pub fn crop_window(&self) -> Result<JsValue, JsValue> {
        let window = self.inner.crop_window();
        serde_wasm_bindgen::to_value(&(window.bounds(), window.overlay_rects()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Guide line positions, or `undefined` outside manual mode.
    pub fn guide_lines(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.guide_lines())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current print grid with cell positions for the selected count.
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        let grid = self.inner.layout();
        let positions = grid.positions(self.inner.photo_count());
        serde_wasm_bindgen::to_value(&(grid, positions))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The composited ID photo.
    pub fn cropped_photo(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .cropped_photo()
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_photo_jpeg(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_photo_jpeg()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Reduced print sheet for the preview dialog.
    pub fn print_preview(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .print_preview()
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_print_sheet_jpeg(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_print_sheet_jpeg()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

//! ID Photo WASM - WebAssembly bindings for the ID photo editor
//!
//! This crate exposes the idphoto-core editor session and catalogs to a
//! browser front end.
//!
//! # Module Structure
//!
//! - `session` - The editor session: load, pan, zoom, adjust, export
//! - `catalog` - Photo specs and paper sizes
//! - `encode` - JPEG encoding with a density tag
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession, photo_spec_names } from '@idphoto/wasm';
//!
//! await init();
//!
//! const session = new JsEditorSession(null);
//! session.select_photo_spec(photo_spec_names()[0]);
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod encode;
mod session;
mod types;

pub use catalog::{paper_names, paper_specs, photo_spec_names, photo_specs};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use session::JsEditorSession;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed
        return;
    }
    log::info!("ID photo editor {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

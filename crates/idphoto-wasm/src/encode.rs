//! Image encoding WASM bindings.
//!
//! Session exports already carry the configured quality and density tag.
//! These functions cover images the page holds on its own.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@idphoto/wasm';
//!
//! const jpeg = encode_jpeg_from_image(session.cropped_photo(), 95, 300);
//! ```

use crate::types::JsDecodedImage;
use idphoto_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes with a dots-per-inch density tag.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    dpi: u16,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg_with_dpi(pixels, width, height, quality, dpi)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to JPEG bytes with a density tag.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(
    image: &JsDecodedImage,
    quality: u8,
    dpi: u16,
) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg_with_dpi(&pixels, image.width(), image.height(), quality, dpi)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

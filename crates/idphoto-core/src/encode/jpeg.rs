//! JPEG encoding for saved photos and print sheets.
//!
//! Output carries a JFIF density tag so print software sizes the sheet
//! correctly.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode(pixels, width, height, quality, None)
}

/// Encode RGB pixel data to JPEG bytes with a dots-per-inch density tag.
pub fn encode_jpeg_with_dpi(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    dpi: u16,
) -> Result<Vec<u8>, EncodeError> {
    encode(pixels, width, height, quality, Some(dpi))
}

/// Encode an image and write it to `path`.
pub fn save_jpeg_file(
    path: &Path,
    image: &DecodedImage,
    quality: u8,
    dpi: u16,
) -> Result<(), EncodeError> {
    let bytes = encode_jpeg_with_dpi(&image.pixels, image.width, image.height, quality, dpi)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::IoError(e.to_string()))?;
    log::info!(
        "Saved {}x{} JPEG to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    dpi: Option<u16>,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    if let Some(dpi) = dpi {
        encoder.set_pixel_density(PixelDensity::dpi(dpi));
    }

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Offsets inside the JFIF APP0 segment written right after SOI.
    const JFIF_UNITS: usize = 13;
    const JFIF_X_DENSITY: usize = 14;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_writes_dpi_tag() {
        let pixels = vec![255u8; 20 * 10 * 3];
        let jpeg = encode_jpeg_with_dpi(&pixels, 20, 10, 95, 300).unwrap();

        assert_eq!(&jpeg[2..4], &[0xFF, 0xE0]);
        assert_eq!(&jpeg[6..11], b"JFIF\0");
        assert_eq!(jpeg[JFIF_UNITS], 1, "density unit should be dots per inch");
        assert_eq!(&jpeg[JFIF_X_DENSITY..JFIF_X_DENSITY + 4], &[0x01, 0x2C, 0x01, 0x2C]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3]; // One row short
        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));

        let result = encode_jpeg_with_dpi(&[], 100, 0, 90, 300);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_save_jpeg_file_round_trip_size() {
        let path = std::env::temp_dir().join("idphoto_encode_test.jpg");
        let image = DecodedImage::filled(30, 40, [255, 255, 255]);

        save_jpeg_file(&path, &image, 95, 300).unwrap();
        let decoded = crate::decode::load_image_file(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (30, 40));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_jpeg_file_bad_directory() {
        let image = DecodedImage::filled(2, 2, [0, 0, 0]);
        let result = save_jpeg_file(Path::new("/nonexistent/dir/out.jpg"), &image, 95, 300);
        assert!(matches!(result, Err(EncodeError::IoError(_))));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Valid inputs always produce a JPEG with SOI marker.
        #[test]
        fn prop_valid_input_produces_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
            dpi in 72u16..=600,
        ) {
            let pixels = vec![200u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg_with_dpi(&pixels, width, height, quality, dpi).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        }

        /// Property: Invalid pixel data length always returns error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=30, 1u32..=30),
            delta in 1usize..=10,
            grow in any::<bool>(),
        ) {
            let expected_size = (width as usize) * (height as usize) * 3;
            let actual_size = if grow {
                expected_size + delta
            } else {
                expected_size.saturating_sub(delta)
            };

            let pixels = vec![128u8; actual_size];
            let result = encode_jpeg(&pixels, width, height, 95);
            let is_invalid = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(is_invalid, "expected InvalidPixelData");
        }
    }
}

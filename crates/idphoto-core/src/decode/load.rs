//! Loading JPEG and PNG portraits into an opaque RGB source image.
//!
//! Transparency is flattened onto white at load time so every later stage
//! works on plain RGB data. JPEG EXIF orientation is applied before
//! flattening so the portrait is upright in the viewport.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};

use super::{DecodeError, DecodedImage, Orientation};

/// File extensions accepted by [`load_image_file`].
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Decode a JPEG or PNG image from bytes.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the content is neither JPEG
/// nor PNG, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format();
    if !matches!(format, Some(ImageFormat::Jpeg) | Some(ImageFormat::Png)) {
        return Err(DecodeError::UnsupportedFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = if format == Some(ImageFormat::Jpeg) {
        apply_orientation(img, extract_orientation(bytes))
    } else {
        img
    };

    Ok(flatten_to_rgb(img))
}

/// Read and decode an image file.
///
/// The extension is checked before the file is read.
pub fn load_image_file(path: &Path) -> Result<DecodedImage, DecodeError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DecodeError::UnsupportedExtension(extension));
    }

    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    let image = decode_image(&bytes)?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    Ok(image)
}

/// Convert any decoded image to opaque RGB, compositing alpha over white.
fn flatten_to_rgb(img: DynamicImage) -> DecodedImage {
    if img.color().has_alpha() {
        composite_over_white(&img.to_rgba8())
    } else {
        DecodedImage::from_rgb_image(img.into_rgb8())
    }
}

/// Paste an RGBA image onto a white canvas using its alpha as the mask.
fn composite_over_white(rgba: &RgbaImage) -> DecodedImage {
    let (width, height) = rgba.dimensions();
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);

    for px in rgba.pixels() {
        let alpha = px[3] as u32;
        for &channel in &px.0[..3] {
            pixels.push(blend_channel(255, channel as u32, alpha));
        }
    }

    DecodedImage::new(width, height, pixels)
}

/// 8-bit mask blend: `background * (255 - mask) + foreground * mask`,
/// divided by 255 with rounding.
#[inline]
fn blend_channel(background: u32, foreground: u32, mask: u32) -> u8 {
    let tmp = background * (255 - mask) + foreground * mask + 128;
    ((tmp + (tmp >> 8)) >> 8) as u8
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, Rgba};

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buffer)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::Rgba8,
            )
            .unwrap();
        buffer
    }

    fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 3) as usize];
        crate::encode::encode_jpeg(&pixels, width, height, 90).unwrap()
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_test_jpeg(8, 6);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (8, 6));
        assert_eq!(img.pixels.len(), 8 * 6 * 3);
    }

    #[test]
    fn test_decode_png_opaque() {
        let src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let img = decode_image(&encode_png(&src)).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert!(img.is_uniform([10, 20, 30]));
    }

    #[test]
    fn test_transparent_png_becomes_white() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let img = decode_image(&encode_png(&src)).unwrap();
        assert!(img.is_uniform([255, 255, 255]));
    }

    #[test]
    fn test_half_transparent_png_blends_with_white() {
        let src = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let img = decode_image(&encode_png(&src)).unwrap();
        // 255 * 127 / 255 rounds to 127
        assert_eq!(img.pixel(0, 0), Some([127, 127, 127]));
    }

    #[test]
    fn test_blend_channel_extremes() {
        assert_eq!(blend_channel(255, 0, 0), 255);
        assert_eq!(blend_channel(255, 0, 255), 0);
        assert_eq!(blend_channel(255, 100, 255), 100);
    }

    #[test]
    fn test_decode_rejects_other_formats() {
        // Minimal BMP header magic
        let result = decode_image(b"BM\x00\x00\x00\x00\x00\x00\x00\x00");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0x00, 0x01, 0x02, 0x03]).is_err());
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = encode_test_jpeg(16, 16);
        let result = decode_image(&bytes[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = encode_test_jpeg(2, 2);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);
        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal);
        let rgb_result = result.into_rgb8();
        assert_eq!(rgb_result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb_result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_load_rejects_extension() {
        let result = load_image_file(Path::new("portrait.gif"));
        assert!(matches!(result, Err(DecodeError::UnsupportedExtension(ext)) if ext == "gif"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image_file(Path::new("/nonexistent/dir/portrait.JPG"));
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_load_png_file() {
        let path = std::env::temp_dir().join("idphoto_load_test.png");
        let src = RgbaImage::from_pixel(5, 7, Rgba([1, 2, 3, 255]));
        std::fs::write(&path, encode_png(&src)).unwrap();

        let img = load_image_file(&path).unwrap();
        assert_eq!((img.width, img.height), (5, 7));
        assert_eq!(img.pixel(0, 0), Some([1, 2, 3]));

        std::fs::remove_file(&path).ok();
    }
}

//! Inverse-mapped sampling of a scaled image.
//!
//! Used when the zoomed image is too large to materialize: only the pixels
//! that land inside the crop window are computed. For each output pixel we
//! find the corresponding source position and interpolate bilinearly:
//!
//! ```text
//! src_x = (dst_x + 0.5) * src_w / scaled_w - 0.5
//! src_y = (dst_y + 0.5) * src_h / scaled_h - 0.5
//! ```
//!
//! Positions outside the source are clamped to the nearest edge pixel.

use crate::decode::DecodedImage;

/// Render the `width x height` block at `(x, y)` of `image` scaled to
/// `scaled_w x scaled_h`.
pub(crate) fn sample_scaled_region(
    image: &DecodedImage,
    scaled: (u64, u64),
    x: u64,
    y: u64,
    width: u32,
    height: u32,
) -> DecodedImage {
    let ratio_x = image.width as f64 / scaled.0 as f64;
    let ratio_y = image.height as f64 / scaled.1 as f64;

    let mut output = Vec::with_capacity(width as usize * height as usize * 3);

    for row in 0..height as u64 {
        let src_y = ((y + row) as f64 + 0.5) * ratio_y - 0.5;
        for col in 0..width as u64 {
            let src_x = ((x + col) as f64 + 0.5) * ratio_x - 0.5;
            output.extend_from_slice(&sample_bilinear(image, src_x, src_y));
        }
    }

    DecodedImage::new(width, height, output)
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation with edge clamping.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

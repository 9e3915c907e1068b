//! The crop transform: from a panned and zoomed portrait to a fixed-size photo.
//!
//! # Coordinate System
//!
//! - The viewport origin is its top-left corner
//! - The crop window is the target-sized box centred in the viewport
//! - The view offset is the viewport position of the scaled image's centre
//!
//! A viewport point `p` maps to scaled-image coordinates as
//! `p - (offset - scaled_size / 2)`.
//!
//! # Rounding
//!
//! The window's far edges are rounded up before mapping so the pasted block
//! reaches the canvas edge without a one-pixel seam. All mapped coordinates
//! are then floored.

use crate::adjustments::{apply_adjustments, AdjustmentState};
use crate::decode::{resize, DecodedImage, FilterType};
use crate::spec::RgbColor;

use super::sample::sample_scaled_region;
use super::view::{CropWindow, ViewState, Viewport};

/// Largest enlarged image (in pixels) that is resized in full. Beyond this
/// only the visible window is sampled. Shrinking always resizes in full.
pub const MAX_SCALED_PIXELS: u64 = 40_000_000;

/// The visible part of the scaled image and where it lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Top-left of the block in scaled-image coordinates.
    pub src_x: u64,
    pub src_y: u64,
    pub width: u32,
    pub height: u32,
    /// Top-left of the block on the output canvas.
    pub dest_x: u32,
    pub dest_y: u32,
}

/// Intersect the crop window with a scaled image of size `scaled`.
///
/// Returns `None` when no part of the image falls inside the window.
pub fn plan_crop(window: &CropWindow, view: &ViewState, scaled: (u64, u64)) -> Option<CropRegion> {
    let (scaled_w, scaled_h) = (to_i64(scaled.0), to_i64(scaled.1));
    let (target_w, target_h) = (window.width as i64, window.height as i64);
    if scaled_w == 0 || scaled_h == 0 || target_w == 0 || target_h == 0 {
        return None;
    }

    let right = (window.left + window.width as f64).ceil();
    let bottom = (window.top + window.height as f64).ceil();

    let origin_x = view.offset_x - scaled_w as f64 / 2.0;
    let origin_y = view.offset_y - scaled_h as f64 / 2.0;

    let x1 = floor_i64(window.left - origin_x);
    let y1 = floor_i64(window.top - origin_y);
    let x2 = floor_i64(right - origin_x);
    let y2 = floor_i64(bottom - origin_y);

    let dest_x = x1.saturating_neg().max(0);
    let dest_y = y1.saturating_neg().max(0);
    let crop_x = x1.max(0);
    let crop_y = y1.max(0);
    let crop_right = x2.min(scaled_w);
    let crop_bottom = y2.min(scaled_h);

    if crop_right <= crop_x || crop_bottom <= crop_y {
        return None;
    }
    if dest_x >= target_w || dest_y >= target_h {
        return None;
    }

    // The paste is clipped to the canvas
    let width = (crop_right - crop_x).min(target_w - dest_x);
    let height = (crop_bottom - crop_y).min(target_h - dest_y);

    Some(CropRegion {
        src_x: crop_x as u64,
        src_y: crop_y as u64,
        width: width as u32,
        height: height as u32,
        dest_x: dest_x as u32,
        dest_y: dest_y as u32,
    })
}

/// Composite the visible part of the adjusted, scaled source onto a
/// `target`-sized canvas filled with `background`.
///
/// The result is a pure function of the inputs. An image scaled to nothing
/// or moved entirely outside the crop window yields a plain background
/// canvas.
pub fn compute_crop(
    source: &DecodedImage,
    viewport: &Viewport,
    view: &ViewState,
    adjustment: &AdjustmentState,
    target: (u32, u32),
    background: RgbColor,
) -> DecodedImage {
    let mut canvas = DecodedImage::filled(target.0, target.1, background);
    if source.is_empty() {
        return canvas;
    }
    if let Err(e) = source.validate() {
        log::warn!("Skipping crop of malformed source: {}", e);
        return canvas;
    }

    let scaled = view.scaled_size(source.width, source.height);
    let window = viewport.crop_window(target);
    let Some(region) = plan_crop(&window, view, scaled) else {
        log::debug!(
            "Crop window misses scaled image {}x{}, output is background only",
            scaled.0,
            scaled.1
        );
        return canvas;
    };

    let adjusted = apply_adjustments(source, adjustment);

    let visible = if resizes_in_full((source.width, source.height), scaled) {
        match resize(&adjusted, scaled.0 as u32, scaled.1 as u32, FilterType::Lanczos3) {
            Ok(resized) => extract(
                &resized,
                region.src_x as u32,
                region.src_y as u32,
                region.width,
                region.height,
            ),
            Err(e) => {
                log::warn!("Resize for crop failed: {}", e);
                return canvas;
            }
        }
    } else {
        sample_scaled_region(
            &adjusted,
            scaled,
            region.src_x,
            region.src_y,
            region.width,
            region.height,
        )
    };

    log::debug!(
        "Crop {}x{} from ({}, {}) to ({}, {}) at scale {}",
        region.width,
        region.height,
        region.src_x,
        region.src_y,
        region.dest_x,
        region.dest_y,
        view.scale
    );

    paste(&mut canvas, &visible, region.dest_x, region.dest_y);
    canvas
}

/// Copy a `width x height` block starting at `(left, top)`.
///
/// The block must lie inside `image`.
/// Whether the scaled image can be produced by a filtered resize of the
/// whole source. Downscales always qualify so they never alias.
fn resizes_in_full(source: (u32, u32), scaled: (u64, u64)) -> bool {
    let shrinking = scaled.0 <= u64::from(source.0) && scaled.1 <= u64::from(source.1);
    shrinking
        || scaled
            .0
            .checked_mul(scaled.1)
            .is_some_and(|area| area <= MAX_SCALED_PIXELS)
}

fn extract(image: &DecodedImage, left: u32, top: u32, width: u32, height: u32) -> DecodedImage {
    let row_bytes = width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * height as usize);

    for y in top..top + height {
        let start = (y as usize * image.width as usize + left as usize) * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(width, height, output)
}

/// Paste `block` onto `canvas` at `(x, y)`, clipping at the canvas edges.
pub(crate) fn paste(canvas: &mut DecodedImage, block: &DecodedImage, x: u32, y: u32) {
    if x >= canvas.width || y >= canvas.height {
        return;
    }
    let width = block.width.min(canvas.width - x) as usize;
    let height = block.height.min(canvas.height - y);

    for row in 0..height {
        let src = row as usize * block.width as usize * 3;
        let dst = ((y + row) as usize * canvas.width as usize + x as usize) * 3;
        canvas.pixels[dst..dst + width * 3].copy_from_slice(&block.pixels[src..src + width * 3]);
    }
}

#[inline]
fn floor_i64(value: f64) -> i64 {
    value.floor() as i64
}

#[inline]
fn to_i64(value: u64) -> i64 {
    value.min(i64::MAX as u64 / 4) as i64
}


// ============================================================================
// Property-Based Tests
// ============================================================================

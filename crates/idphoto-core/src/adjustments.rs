//! Brightness and contrast adjustment.
//!
//! Both controls are multiplicative factors where 1.0 is identity. They are
//! always applied to the original source image, never to a previously
//! adjusted copy, so moving a slider back restores the original pixels.
//!
//! ## Order
//! 1. Brightness: blend toward black
//! 2. Contrast: blend toward the mean luma of the brightened image

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Lowest value offered by the adjustment sliders.
pub const ADJUSTMENT_MIN: f32 = 0.8;
/// Highest value offered by the adjustment sliders.
pub const ADJUSTMENT_MAX: f32 = 1.2;
/// Slider resolution.
pub const ADJUSTMENT_STEP: f32 = 0.05;

/// Current brightness and contrast factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentState {
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

impl AdjustmentState {
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// Build a state from raw slider positions, clamped to the slider range
    /// and snapped to its step.
    pub fn from_sliders(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness: snap_to_slider(brightness),
            contrast: snap_to_slider(contrast),
        }
    }

    /// Check if both factors are identity.
    pub fn is_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0
    }
}

fn snap_to_slider(value: f32) -> f32 {
    if !value.is_finite() {
        return 1.0;
    }
    let clamped = value.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
    let steps = ((clamped - ADJUSTMENT_MIN) / ADJUSTMENT_STEP).round();
    (ADJUSTMENT_MIN + steps * ADJUSTMENT_STEP).clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX)
}

/// Return a freshly adjusted copy of `image`.
///
/// # Example
/// ```ignore
/// let adjusted = apply_adjustments(&source, &AdjustmentState::new(1.1, 0.9));
/// ```
pub fn apply_adjustments(image: &DecodedImage, adjustment: &AdjustmentState) -> DecodedImage {
    let mut output = image.clone();
    if adjustment.is_identity() {
        return output;
    }

    apply_brightness(&mut output.pixels, adjustment.brightness);
    apply_contrast(&mut output.pixels, adjustment.contrast);
    output
}

/// Scale every channel: `out = in * factor`.
fn apply_brightness(pixels: &mut [u8], factor: f32) {
    if factor == 1.0 {
        return;
    }
    for value in pixels.iter_mut() {
        *value = blend(0.0, *value, factor);
    }
}

/// Stretch every channel around the image's mean luma.
fn apply_contrast(pixels: &mut [u8], factor: f32) {
    if factor == 1.0 || pixels.is_empty() {
        return;
    }
    let mean = mean_luma(pixels);
    for value in pixels.iter_mut() {
        *value = blend(mean, *value, factor);
    }
}

/// Interpolate from `base` toward `value` by `factor`, truncating into 0-255.
#[inline]
fn blend(base: f32, value: u8, factor: f32) -> u8 {
    let out = base + factor * (value as f32 - base);
    if out <= 0.0 {
        0
    } else if out >= 255.0 {
        255
    } else {
        out as u8
    }
}

/// Mean ITU-R 601 luma, rounded to an integer level.
fn mean_luma(pixels: &[u8]) -> f32 {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for chunk in pixels.chunks_exact(3) {
        sum += luma(chunk[0], chunk[1], chunk[2]) as u64;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 + 0.5).floor() as f32
}

/// Fixed-point 8-bit luma: `(19595 R + 38470 G + 7471 B + 0x8000) >> 16`.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u32 {
    (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16
}

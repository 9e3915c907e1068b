//! Viewport geometry and the pan/zoom view state.
//!
//! All coordinates here are viewport pixels with the origin at the top-left
//! corner of the viewport.

use serde::{Deserialize, Serialize};

/// Fixed-size on-screen working area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 1000,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Integer centre of the viewport, where a freshly loaded image is placed.
    pub fn center(&self) -> (f64, f64) {
        ((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// The crop window for a target size, centered in the viewport.
    pub fn crop_window(&self, target: (u32, u32)) -> CropWindow {
        CropWindow {
            viewport: *self,
            left: (self.width as f64 - target.0 as f64) / 2.0,
            top: (self.height as f64 - target.1 as f64) / 2.0,
            width: target.0,
            height: target.1,
        }
    }
}

/// An axis-aligned integer rectangle `[x0, x1) x [y0, y1)` in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i64 {
        self.y1 - self.y0
    }
}

/// The target box whose contents become the final photo.
///
/// `left`/`top` keep the exact half-pixel position used by the crop math.
/// [`CropWindow::bounds`] gives the floored rectangle used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropWindow {
    pub viewport: Viewport,
    pub left: f64,
    pub top: f64,
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    /// Window bounds with the top-left corner floored to whole pixels.
    pub fn bounds(&self) -> PixelRect {
        let x0 = self.left.floor() as i64;
        let y0 = self.top.floor() as i64;
        PixelRect {
            x0,
            y0,
            x1: x0 + self.width as i64,
            y1: y0 + self.height as i64,
        }
    }

    /// The four shaded rectangles around the window: top, bottom, left, right.
    pub fn overlay_rects(&self) -> [PixelRect; 4] {
        let b = self.bounds();
        let vw = self.viewport.width as i64;
        let vh = self.viewport.height as i64;
        [
            PixelRect { x0: 0, y0: 0, x1: vw, y1: b.y0 },
            PixelRect { x0: 0, y0: b.y1, x1: vw, y1: vh },
            PixelRect { x0: 0, y0: b.y0, x1: b.x0, y1: b.y1 },
            PixelRect { x0: b.x1, y0: b.y0, x1: vw, y1: b.y1 },
        ]
    }
}

/// Uniform scale plus the viewport position of the scaled image's centre.
///
/// Neither value is bounded; a scale that shrinks the image to nothing or
/// an offset that moves it off screen are valid states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::centered(Viewport::default())
    }
}

impl ViewState {
    /// Scale 1 with the image centred in the viewport.
    pub fn centered(viewport: Viewport) -> Self {
        let (offset_x, offset_y) = viewport.center();
        Self {
            scale: 1.0,
            offset_x,
            offset_y,
        }
    }

    /// Move the image by a drag delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Multiply the scale by `factor`.
    pub fn zoom(&mut self, factor: f64) {
        self.scale *= factor;
    }

    /// Apply one wheel tick. A positive delta zooms in.
    pub fn zoom_wheel(&mut self, delta: f64, zoom_in_factor: f64, zoom_out_factor: f64) {
        if delta > 0.0 {
            self.zoom(zoom_in_factor);
        } else {
            self.zoom(zoom_out_factor);
        }
    }

    /// Size of an image of `width x height` pixels after scaling, truncated.
    pub fn scaled_size(&self, width: u32, height: u32) -> (u64, u64) {
        (
            scale_dimension(width, self.scale),
            scale_dimension(height, self.scale),
        )
    }
}

fn scale_dimension(size: u32, scale: f64) -> u64 {
    let scaled = size as f64 * scale;
    if scaled.is_finite() && scaled > 0.0 {
        scaled as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_window_centered() {
        let window = Viewport::new(800, 1000).crop_window((390, 567));
        assert_eq!(window.left, 205.0);
        assert_eq!(window.top, 216.5);

        let b = window.bounds();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (205, 216, 595, 783));
    }

    #[test]
    fn test_crop_window_larger_than_viewport() {
        let window = Viewport::new(100, 100).crop_window((300, 300));
        assert_eq!(window.left, -100.0);
        assert_eq!(window.bounds().width(), 300);
    }

    #[test]
    fn test_overlay_rects_surround_window() {
        let window = Viewport::new(800, 1000).crop_window((602, 602));
        let [top, bottom, left, right] = window.overlay_rects();
        let b = window.bounds();

        assert_eq!(top.height(), b.y0);
        assert_eq!(bottom.y0, b.y1);
        assert_eq!(bottom.y1, 1000);
        assert_eq!(left.x1, b.x0);
        assert_eq!(right.x0, b.x1);
        assert_eq!(left.height(), 602);
        // Shaded area plus window covers the viewport exactly
        let area: i64 = [top, bottom, left, right]
            .iter()
            .map(|r| r.width() * r.height())
            .sum();
        assert_eq!(area + 602 * 602, 800 * 1000);
    }

    #[test]
    fn test_centered_view() {
        let view = ViewState::centered(Viewport::new(801, 1001));
        assert_eq!(view.scale, 1.0);
        assert_eq!((view.offset_x, view.offset_y), (400.0, 500.0));
    }

    #[test]
    fn test_pan_accumulates() {
        let mut view = ViewState::default();
        view.pan(10.0, -5.0);
        view.pan(3.0, 2.0);
        assert_eq!((view.offset_x, view.offset_y), (413.0, 497.0));
    }

    #[test]
    fn test_zoom_wheel() {
        let mut view = ViewState::default();
        view.zoom_wheel(120.0, 1.1, 0.9);
        assert!((view.scale - 1.1).abs() < 1e-12);
        view.zoom_wheel(-120.0, 1.1, 0.9);
        assert!((view.scale - 0.99).abs() < 1e-12);
        view.zoom_wheel(0.0, 1.1, 0.9);
        assert!((view.scale - 0.891).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_size_truncates() {
        let view = ViewState {
            scale: 0.333,
            ..ViewState::default()
        };
        assert_eq!(view.scaled_size(100, 10), (33, 3));
    }

    #[test]
    fn test_scaled_size_degenerate_scales() {
        let mut view = ViewState::default();
        view.scale = 0.0;
        assert_eq!(view.scaled_size(100, 100), (0, 0));
        view.scale = -2.0;
        assert_eq!(view.scaled_size(100, 100), (0, 0));
        view.scale = f64::NAN;
        assert_eq!(view.scaled_size(100, 100), (0, 0));
    }
}

//! Advisory face-placement guides drawn over the crop window.
//!
//! Guides never affect the crop. They are positioned in viewport pixels from
//! the window bounds and the spec's millimetre ranges.

use serde::{Deserialize, Serialize};

use crate::spec::PhotoSpec;
use crate::transform::CropWindow;

/// Share of the head size drawn above the eye line.
const HEAD_ABOVE_EYES: f64 = 0.4;
/// Share of the head size drawn below the eye line.
const HEAD_BELOW_EYES: f64 = 0.6;

/// How the user positions the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdjustmentMode {
    /// Pan and zoom by hand with guides shown.
    #[default]
    Manual,
    /// Offered as a choice but has no behaviour of its own.
    Auto,
}

impl AdjustmentMode {
    pub fn label(self) -> &'static str {
        match self {
            AdjustmentMode::Manual => "Manual Adjustment",
            AdjustmentMode::Auto => "Auto Adjustment",
        }
    }

    pub fn shows_guides(self) -> bool {
        self == AdjustmentMode::Manual
    }
}

/// Guide line positions in viewport pixels.
///
/// Horizontal lines span `left..=right`. The centre line spans
/// `top..=bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLines {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
    /// Vertical centre line.
    pub center_x: i64,
    /// Lower bound of the eye line.
    pub eyes_min_y: i64,
    /// Upper bound of the eye line.
    pub eyes_max_y: i64,
    pub eyes_center_y: f64,
    /// Head top for the largest head size.
    pub head_top_max_y: f64,
    /// Head top for the smallest head size.
    pub head_top_min_y: f64,
    /// Chin for the smallest head size.
    pub head_bottom_min_y: f64,
    /// Chin for the largest head size.
    pub head_bottom_max_y: f64,
}

impl GuideLines {
    /// Compute the guides for `spec` inside `window`.
    pub fn compute(window: &CropWindow, spec: &PhotoSpec) -> Self {
        let bounds = window.bounds();
        let px_per_mm = spec.px_per_mm();
        let guides = &spec.guide_lines;

        let eyes_min_y = bounds.y1 - (guides.eyes_position_min * px_per_mm) as i64;
        let eyes_max_y = bounds.y1 - (guides.eyes_position_max * px_per_mm) as i64;
        let eyes_center_y = (eyes_min_y + eyes_max_y) as f64 / 2.0;

        let head_min = guides.head_size_min * px_per_mm;
        let head_max = guides.head_size_max * px_per_mm;

        Self {
            left: bounds.x0,
            right: bounds.x1,
            top: bounds.y0,
            bottom: bounds.y1,
            center_x: (bounds.x0 + bounds.x1).div_euclid(2),
            eyes_min_y,
            eyes_max_y,
            eyes_center_y,
            head_top_max_y: eyes_center_y - (head_max * HEAD_ABOVE_EYES).trunc(),
            head_top_min_y: eyes_center_y - (head_min * HEAD_ABOVE_EYES).trunc(),
            head_bottom_min_y: eyes_center_y + (head_min * HEAD_BELOW_EYES).trunc(),
            head_bottom_max_y: eyes_center_y + (head_max * HEAD_BELOW_EYES).trunc(),
        }
    }

    /// The four head-size lines from top to bottom.
    pub fn head_lines(&self) -> [f64; 4] {
        [
            self.head_top_max_y,
            self.head_top_min_y,
            self.head_bottom_min_y,
            self.head_bottom_max_y,
        ]
    }
}

/// Guides to draw in `mode`, if any.
pub fn guide_lines_for(
    mode: AdjustmentMode,
    window: &CropWindow,
    spec: &PhotoSpec,
) -> Option<GuideLines> {
    mode.shows_guides().then(|| GuideLines::compute(window, spec))
}

//! Photo and paper specifications.
//!
//! A [`PhotoSpec`] describes one identification-photo format (physical size,
//! print resolution, background color and advisory guide lines). A
//! [`PaperSpec`] describes a photo paper sheet. Both are immutable values
//! picked from a [`Catalog`].
//!
//! # Units
//!
//! Physical sizes are in millimetres. Pixel sizes derive from
//! `mm * dpi / 25.4`:
//! - target photo sizes use rounding ([`mm_to_px_rounded`])
//! - print sheet sizes and positions use truncation ([`mm_to_px`])

mod catalog;

pub use catalog::{
    Catalog, CatalogError, DEFAULT_PAPER, DEFAULT_PHOTO_SPEC, PAPER_4X6, PAPER_5X7,
    PHOTO_CHINA_PASSPORT, PHOTO_US_PASSPORT,
};

use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// An opaque RGB color.
pub type RgbColor = [u8; 3];

/// White, the fill used for loaded transparency and print sheets.
pub const WHITE: RgbColor = [255, 255, 255];

/// Black, the color of print cell borders.
pub const BLACK: RgbColor = [0, 0, 0];

/// Convert millimetres to pixels, rounding to the nearest pixel.
pub fn mm_to_px_rounded(mm: f64, dpi: f64) -> u32 {
    (mm * dpi / MM_PER_INCH).round().max(0.0) as u32
}

/// Convert millimetres to pixels, truncating toward zero.
pub fn mm_to_px(mm: f64, dpi: f64) -> u32 {
    (mm * dpi / MM_PER_INCH).max(0.0) as u32
}

/// Advisory face-placement ranges, all in millimetres.
///
/// Eye positions are measured up from the bottom edge of the photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLineSpec {
    pub eyes_position_min: f64,
    pub eyes_position_max: f64,
    pub head_size_min: f64,
    pub head_size_max: f64,
}

/// An identification-photo format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSpec {
    /// Catalog key, e.g. "US Passport".
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: u32,
    /// Fill color for any part of the photo not covered by the portrait.
    pub bg_color: RgbColor,
    pub description: String,
    pub guide_lines: GuideLineSpec,
}

impl PhotoSpec {
    /// Target output width in pixels.
    pub fn target_width_px(&self) -> u32 {
        mm_to_px_rounded(self.width_mm, self.dpi as f64)
    }

    /// Target output height in pixels.
    pub fn target_height_px(&self) -> u32 {
        mm_to_px_rounded(self.height_mm, self.dpi as f64)
    }

    /// Target output size `(width, height)` in pixels.
    ///
    /// The save path, the preview path and the viewport crop window all use
    /// this one derivation.
    pub fn target_px(&self) -> (u32, u32) {
        (self.target_width_px(), self.target_height_px())
    }

    /// Smallest source size that gives a good result, `factor` times the target.
    pub fn min_recommended_px(&self, factor: u32) -> (u32, u32) {
        let (w, h) = self.target_px();
        (w.saturating_mul(factor), h.saturating_mul(factor))
    }

    /// Pixels per millimetre at this spec's resolution.
    pub fn px_per_mm(&self) -> f64 {
        self.dpi as f64 / MM_PER_INCH
    }
}

/// A photo paper sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSpec {
    /// Catalog key, e.g. "4x6 inch".
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: u32,
    pub description: String,
}

impl PaperSpec {
    /// Sheet size in pixels at `dpi`.
    pub fn size_px_at(&self, dpi: f64) -> (u32, u32) {
        (mm_to_px(self.width_mm, dpi), mm_to_px(self.height_mm, dpi))
    }

    /// Sheet size in pixels at the paper's own resolution.
    pub fn size_px(&self) -> (u32, u32) {
        self.size_px_at(self.dpi as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_px_rounded() {
        assert_eq!(mm_to_px_rounded(33.0, 300.0), 390);
        assert_eq!(mm_to_px_rounded(48.0, 300.0), 567);
        assert_eq!(mm_to_px_rounded(51.0, 300.0), 602);
        assert_eq!(mm_to_px_rounded(-5.0, 300.0), 0);
    }

    #[test]
    fn test_mm_to_px_truncates() {
        assert_eq!(mm_to_px(33.0, 300.0), 389);
        assert_eq!(mm_to_px(152.4, 300.0), 1800);
        assert_eq!(mm_to_px(101.6, 300.0), 1200);
        assert_eq!(mm_to_px(50.8, 300.0), 600);
    }

    #[test]
    fn test_target_px_for_every_catalog_spec() {
        let catalog = Catalog::builtin();
        for spec in catalog.photo_specs() {
            let (w, h) = spec.target_px();
            let dpi = spec.dpi as f64;
            assert_eq!(w, (spec.width_mm * dpi / 25.4).round() as u32);
            assert_eq!(h, (spec.height_mm * dpi / 25.4).round() as u32);
            assert!(w > 0 && h > 0);
        }
    }

    #[test]
    fn test_china_passport_target() {
        let catalog = Catalog::builtin();
        let spec = catalog.photo(PHOTO_CHINA_PASSPORT).unwrap();
        assert_eq!(spec.target_px(), (390, 567));
        assert_eq!(spec.min_recommended_px(2), (780, 1134));
    }

    #[test]
    fn test_paper_size_px() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.paper(PAPER_4X6).unwrap().size_px(), (1800, 1200));
        assert_eq!(catalog.paper(PAPER_5X7).unwrap().size_px(), (2100, 1500));
        assert_eq!(
            catalog.paper(PAPER_4X6).unwrap().size_px_at(150.0),
            (900, 600)
        );
    }
}

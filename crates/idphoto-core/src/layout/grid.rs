//! Grid tiling of a photo size over a paper sheet.

use serde::{Deserialize, Serialize};

use crate::spec::{PaperSpec, PhotoSpec};

/// A fixed grid used instead of the packing formula for one
/// photo size and paper size pair.
///
/// Sizes are matched exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOverride {
    pub photo_width_mm: f64,
    pub photo_height_mm: f64,
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    pub rows: u32,
    pub cols: u32,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
}

impl LayoutOverride {
    fn matches(&self, paper: &PaperSpec, photo: &PhotoSpec) -> bool {
        self.photo_width_mm == photo.width_mm
            && self.photo_height_mm == photo.height_mm
            && self.paper_width_mm == paper.width_mm
            && self.paper_height_mm == paper.height_mm
    }
}

/// Built-in overrides.
///
/// 2x2 inch photos on 4x6 inch paper are laid out in inches: 3 by 2 cells of
/// 50.8mm, which the 51mm packing would reduce to 2 columns.
pub const LAYOUT_OVERRIDES: &[LayoutOverride] = &[LayoutOverride {
    photo_width_mm: 51.0,
    photo_height_mm: 51.0,
    paper_width_mm: 152.4,
    paper_height_mm: 101.6,
    rows: 2,
    cols: 3,
    cell_width_mm: 50.8,
    cell_height_mm: 50.8,
}];

/// Top-left corner of one cell on the sheet, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPosition {
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Rows and columns of edge-to-edge cells, centred on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintLayoutGrid {
    pub rows: u32,
    pub cols: u32,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    pub margin_x_mm: f64,
    pub margin_y_mm: f64,
}

impl PrintLayoutGrid {
    /// Build a grid of `rows x cols` cells centred on a sheet.
    pub fn centered(
        paper_width_mm: f64,
        paper_height_mm: f64,
        rows: u32,
        cols: u32,
        cell_width_mm: f64,
        cell_height_mm: f64,
    ) -> Self {
        Self {
            rows,
            cols,
            cell_width_mm,
            cell_height_mm,
            margin_x_mm: ((paper_width_mm - cols as f64 * cell_width_mm) / 2.0).max(0.0),
            margin_y_mm: ((paper_height_mm - rows as f64 * cell_height_mm) / 2.0).max(0.0),
        }
    }

    /// Number of cells on the sheet.
    pub fn max_photos(&self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }

    /// Top-left corners of the first `requested` cells in row-major order.
    ///
    /// Requests beyond the grid capacity are dropped.
    pub fn positions(&self, requested: u32) -> Vec<CellPosition> {
        let count = requested.min(self.max_photos());
        (0..count)
            .map(|i| {
                let row = i / self.cols;
                let col = i % self.cols;
                CellPosition {
                    x_mm: self.margin_x_mm + col as f64 * self.cell_width_mm,
                    y_mm: self.margin_y_mm + row as f64 * self.cell_height_mm,
                }
            })
            .collect()
    }
}

/// Lay out `photo` on `paper` using the built-in overrides.
pub fn compute_layout(paper: &PaperSpec, photo: &PhotoSpec) -> PrintLayoutGrid {
    compute_layout_with(paper, photo, LAYOUT_OVERRIDES)
}

/// Lay out `photo` on `paper`, consulting `overrides` before packing.
pub fn compute_layout_with(
    paper: &PaperSpec,
    photo: &PhotoSpec,
    overrides: &[LayoutOverride],
) -> PrintLayoutGrid {
    if let Some(rule) = overrides.iter().find(|rule| rule.matches(paper, photo)) {
        log::debug!(
            "Layout override for {} on {}: {}x{} cells of {}x{}mm",
            photo.name,
            paper.name,
            rule.cols,
            rule.rows,
            rule.cell_width_mm,
            rule.cell_height_mm
        );
        return PrintLayoutGrid::centered(
            paper.width_mm,
            paper.height_mm,
            rule.rows,
            rule.cols,
            rule.cell_width_mm,
            rule.cell_height_mm,
        );
    }

    let cols = fit_count(paper.width_mm, photo.width_mm);
    let rows = fit_count(paper.height_mm, photo.height_mm);
    let grid = PrintLayoutGrid::centered(
        paper.width_mm,
        paper.height_mm,
        rows,
        cols,
        photo.width_mm,
        photo.height_mm,
    );
    log::debug!(
        "Layout for {} on {}: {}x{} cells, margins {:.2}x{:.2}mm",
        photo.name,
        paper.name,
        cols,
        rows,
        grid.margin_x_mm,
        grid.margin_y_mm
    );
    grid
}

/// How many whole cells of `cell` fit in `length`.
fn fit_count(length: f64, cell: f64) -> u32 {
    if !(cell > 0.0 && length.is_finite() && length > 0.0) {
        return 0;
    }
    let mut count = (length / cell).floor();
    // The quotient can round up to a whole number that no longer fits
    if count * cell > length {
        count -= 1.0;
    }
    count.clamp(0.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Catalog, PAPER_4X6, PAPER_5X7, PHOTO_CHINA_PASSPORT, PHOTO_US_PASSPORT};

    fn specs(photo: &str, paper: &str) -> (PhotoSpec, PaperSpec) {
        let catalog = Catalog::builtin();
        (
            catalog.photo(photo).unwrap().clone(),
            catalog.paper(paper).unwrap().clone(),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_us_passport_on_4x6_uses_override() {
        let (photo, paper) = specs(PHOTO_US_PASSPORT, PAPER_4X6);
        let grid = compute_layout(&paper, &photo);

        assert_eq!((grid.rows, grid.cols), (2, 3));
        assert_eq!(grid.max_photos(), 6);
        assert_eq!(grid.cell_width_mm, 50.8);
        assert_eq!(grid.cell_height_mm, 50.8);
        assert_close(grid.margin_x_mm, 0.0);
        assert_close(grid.margin_y_mm, 0.0);
        assert!(grid.margin_x_mm >= 0.0 && grid.margin_y_mm >= 0.0);
    }

    #[test]
    fn test_us_passport_four_photos_row_major() {
        let (photo, paper) = specs(PHOTO_US_PASSPORT, PAPER_4X6);
        let grid = compute_layout(&paper, &photo);
        let positions = grid.positions(4);

        assert_eq!(positions.len(), 4);
        let m_x = grid.margin_x_mm;
        let m_y = grid.margin_y_mm;
        let expected = [
            (m_x, m_y),
            (m_x + 50.8, m_y),
            (m_x + 101.6, m_y),
            (m_x, m_y + 50.8),
        ];
        for (pos, (x, y)) in positions.iter().zip(expected) {
            assert_close(pos.x_mm, x);
            assert_close(pos.y_mm, y);
        }
    }

    #[test]
    fn test_without_override_us_passport_packs_two_columns() {
        let (photo, paper) = specs(PHOTO_US_PASSPORT, PAPER_4X6);
        let grid = compute_layout_with(&paper, &photo, &[]);
        assert_eq!((grid.rows, grid.cols), (1, 2));
        assert_close(grid.margin_x_mm, 25.2);
        assert_close(grid.margin_y_mm, 25.3);
    }

    #[test]
    fn test_china_passport_on_4x6() {
        let (photo, paper) = specs(PHOTO_CHINA_PASSPORT, PAPER_4X6);
        let grid = compute_layout(&paper, &photo);
        assert_eq!((grid.rows, grid.cols), (2, 4));
        assert_eq!(grid.max_photos(), 8);
        assert_close(grid.margin_x_mm, 10.2);
        assert_close(grid.margin_y_mm, 2.8);
    }

    #[test]
    fn test_us_passport_on_5x7() {
        let (photo, paper) = specs(PHOTO_US_PASSPORT, PAPER_5X7);
        let grid = compute_layout(&paper, &photo);
        assert_eq!((grid.rows, grid.cols), (2, 3));
        assert_eq!(grid.cell_width_mm, 51.0);
        assert_close(grid.margin_x_mm, 12.4);
        assert_close(grid.margin_y_mm, 12.5);
    }

    #[test]
    fn test_excess_requests_dropped() {
        let (photo, paper) = specs(PHOTO_CHINA_PASSPORT, PAPER_4X6);
        let grid = compute_layout(&paper, &photo);
        assert_eq!(grid.positions(12).len(), 8);
        assert_eq!(grid.positions(2).len(), 2);
        assert!(grid.positions(0).is_empty());
    }

    #[test]
    fn test_photo_larger_than_paper() {
        let (mut photo, paper) = specs(PHOTO_CHINA_PASSPORT, PAPER_4X6);
        photo.width_mm = 200.0;
        let grid = compute_layout(&paper, &photo);
        assert_eq!(grid.max_photos(), 0);
        assert!(grid.positions(4).is_empty());
    }

    #[test]
    fn test_degenerate_photo_size() {
        let (mut photo, paper) = specs(PHOTO_CHINA_PASSPORT, PAPER_4X6);
        photo.height_mm = 0.0;
        let grid = compute_layout(&paper, &photo);
        assert_eq!(grid.rows, 0);
        assert!(grid.positions(4).is_empty());
    }

    #[test]
    fn test_custom_override_table() {
        let (photo, paper) = specs(PHOTO_CHINA_PASSPORT, PAPER_5X7);
        let rule = LayoutOverride {
            photo_width_mm: 33.0,
            photo_height_mm: 48.0,
            paper_width_mm: 177.8,
            paper_height_mm: 127.0,
            rows: 2,
            cols: 4,
            cell_width_mm: 40.0,
            cell_height_mm: 55.0,
        };
        let grid = compute_layout_with(&paper, &photo, &[rule]);
        assert_eq!((grid.rows, grid.cols), (2, 4));
        assert_close(grid.margin_x_mm, 8.9);
        assert_close(grid.margin_y_mm, 8.5);
    }

    #[test]
    fn test_fit_count() {
        assert_eq!(fit_count(152.4, 33.0), 4);
        assert_eq!(fit_count(0.3, 0.1), 2);
        assert_eq!(fit_count(10.0, -1.0), 0);
        assert_eq!(fit_count(f64::NAN, 1.0), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

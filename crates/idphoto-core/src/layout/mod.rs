//! Print layout: tiling copies of a photo onto a paper sheet.
//!
//! Cells are packed edge to edge with no spacing and the block of cells is
//! centred on the sheet. A small table of overrides replaces the packing
//! formula for specific photo and paper pairs.

mod grid;
mod sheet;

pub use grid::{
    compute_layout, compute_layout_with, CellPosition, LayoutOverride, PrintLayoutGrid,
    LAYOUT_OVERRIDES,
};
pub use sheet::{render_preview, render_sheet, render_sheet_at};

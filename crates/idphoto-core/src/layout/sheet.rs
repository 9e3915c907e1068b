//! Rasterizing a print layout onto a paper-sized canvas.

use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::spec::{mm_to_px, PaperSpec, PhotoSpec, RgbColor, BLACK, WHITE};
use crate::transform::paste;

use super::grid::PrintLayoutGrid;

/// Render `count` copies of `photo` at the paper's own resolution.
pub fn render_sheet(
    photo: &DecodedImage,
    spec: &PhotoSpec,
    paper: &PaperSpec,
    grid: &PrintLayoutGrid,
    count: u32,
) -> Result<DecodedImage, DecodeError> {
    render_sheet_at(photo, spec, paper, grid, count, paper.dpi as f64)
}

/// Render a reduced sheet at `scale` times the paper's resolution.
pub fn render_preview(
    photo: &DecodedImage,
    spec: &PhotoSpec,
    paper: &PaperSpec,
    grid: &PrintLayoutGrid,
    count: u32,
    scale: f64,
) -> Result<DecodedImage, DecodeError> {
    render_sheet_at(photo, spec, paper, grid, count, paper.dpi as f64 * scale)
}

/// Render the sheet at an arbitrary resolution.
///
/// The canvas is white. Cells sit on the grid's pitch, but each one
/// receives the photo resized to the spec's own size at `dpi`, followed by
/// a one-pixel black outline on the photo's innermost edge. Cells are drawn
/// in order, so where a photo is larger than its cell the next cell paints
/// over the overlap. A grid with no cells gives a blank sheet.
pub fn render_sheet_at(
    photo: &DecodedImage,
    spec: &PhotoSpec,
    paper: &PaperSpec,
    grid: &PrintLayoutGrid,
    count: u32,
    dpi: f64,
) -> Result<DecodedImage, DecodeError> {
    let (sheet_w, sheet_h) = paper.size_px_at(dpi);
    let mut sheet = DecodedImage::filled(sheet_w, sheet_h, WHITE);

    let positions = grid.positions(count);
    let photo_w = mm_to_px(spec.width_mm, dpi);
    let photo_h = mm_to_px(spec.height_mm, dpi);
    if positions.is_empty() || photo_w == 0 || photo_h == 0 || photo.is_empty() {
        log::debug!("Blank {}x{} sheet for {}", sheet_w, sheet_h, paper.name);
        return Ok(sheet);
    }

    let print = resize(photo, photo_w, photo_h, FilterType::Lanczos3)?;
    for pos in &positions {
        let x = mm_to_px(pos.x_mm, dpi);
        let y = mm_to_px(pos.y_mm, dpi);
        paste(&mut sheet, &print, x, y);
        draw_border(&mut sheet, x, y, photo_w, photo_h, BLACK);
    }

    log::debug!(
        "Rendered {} photos of {}x{} onto {}x{} sheet at {} dpi",
        positions.len(),
        photo_w,
        photo_h,
        sheet_w,
        sheet_h,
        dpi
    );
    Ok(sheet)
}

/// Outline the rectangle covering `[x, x + width - 1] x [y, y + height - 1]`.
fn draw_border(image: &mut DecodedImage, x: u32, y: u32, width: u32, height: u32, color: RgbColor) {
    if width == 0 || height == 0 {
        return;
    }
    let right = x.saturating_add(width - 1);
    let bottom = y.saturating_add(height - 1);

    for px in x..=right {
        set_pixel(image, px, y, color);
        set_pixel(image, px, bottom, color);
    }
    for py in y..=bottom {
        set_pixel(image, x, py, color);
        set_pixel(image, right, py, color);
    }
}

#[inline]
fn set_pixel(image: &mut DecodedImage, x: u32, y: u32, color: RgbColor) {
    if x < image.width && y < image.height {
        let idx = (y as usize * image.width as usize + x as usize) * 3;
        image.pixels[idx..idx + 3].copy_from_slice(&color);
    }
}

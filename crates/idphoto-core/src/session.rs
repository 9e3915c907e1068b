//! The editor session: every piece of state the interactive front end
//! mutates, held in one explicit value.
//!
//! The front end forwards events (file chosen, drag, wheel tick, slider
//! moved, selector changed, save clicked) to an [`EditorSession`]. The crop
//! and layout algorithms stay pure functions; the session only gathers
//! their inputs.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::adjustments::AdjustmentState;
use crate::config::{ConfigError, EditorConfig};
use crate::decode::{decode_image, load_image_file, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg_with_dpi, save_jpeg_file, EncodeError};
use crate::guides::{guide_lines_for, AdjustmentMode, GuideLines};
use crate::layout::{compute_layout, render_preview, render_sheet, PrintLayoutGrid};
use crate::spec::{Catalog, CatalogError, PaperSpec, PhotoSpec};
use crate::transform::{compute_crop, CropWindow, ViewState};

/// Errors surfaced to the user by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Save or preview was requested before any image was loaded.
    #[error("Please upload an image first")]
    NoImageLoaded,

    #[error("Photo count {0} is not one of the offered choices")]
    InvalidPhotoCount(u32),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// No destination was chosen. Nothing was written.
    Cancelled,
}

/// A source smaller than the recommended size. Loading still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionWarning {
    pub actual: (u32, u32),
    pub recommended: (u32, u32),
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: Recommended resolution is at least {}x{} pixels",
            self.recommended.0, self.recommended.1
        )
    }
}

/// Compare a source size against `factor` times the spec's target size.
pub fn check_resolution(
    size: (u32, u32),
    spec: &PhotoSpec,
    factor: u32,
) -> Option<ResolutionWarning> {
    let recommended = spec.min_recommended_px(factor);
    if size.0 < recommended.0 || size.1 < recommended.1 {
        Some(ResolutionWarning {
            actual: size,
            recommended,
        })
    } else {
        None
    }
}

/// What the front end shows after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub width: u32,
    pub height: u32,
    pub resolution_warning: Option<ResolutionWarning>,
}

/// Editor state for one window.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    catalog: Catalog,
    photo_spec: PhotoSpec,
    paper: PaperSpec,
    photo_count: u32,
    mode: AdjustmentMode,
    source: Option<DecodedImage>,
    view: ViewState,
    adjustment: AdjustmentState,
}

impl EditorSession {
    /// Start a session with the config's default spec, paper and count.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if a default name is not in `catalog`.
    pub fn new(config: EditorConfig, catalog: Catalog) -> Result<Self, SessionError> {
        let photo_spec = catalog.photo(&config.default_photo_spec)?.clone();
        let paper = catalog.paper(&config.default_paper)?.clone();
        let view = ViewState::centered(config.viewport);
        let photo_count = config.default_photo_count;

        Ok(Self {
            config,
            catalog,
            photo_spec,
            paper,
            photo_count,
            mode: AdjustmentMode::default(),
            source: None,
            view,
            adjustment: AdjustmentState::default(),
        })
    }

    /// Start a session from a JSON config file and the built-in catalog.
    pub fn from_config_file(path: &Path) -> Result<Self, SessionError> {
        let config = EditorConfig::load(path)?;
        Self::new(config, Catalog::builtin())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn photo_spec(&self) -> &PhotoSpec {
        &self.photo_spec
    }

    pub fn paper(&self) -> &PaperSpec {
        &self.paper
    }

    pub fn photo_count(&self) -> u32 {
        self.photo_count
    }

    pub fn mode(&self) -> AdjustmentMode {
        self.mode
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn adjustment(&self) -> &AdjustmentState {
        &self.adjustment
    }

    /// The loaded source, without adjustments.
    pub fn source(&self) -> Option<&DecodedImage> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Target photo size in pixels for the selected spec.
    pub fn target_px(&self) -> (u32, u32) {
        self.photo_spec.target_px()
    }

    /// Switch the document type. The view is kept.
    pub fn select_photo_spec(&mut self, name: &str) -> Result<(), SessionError> {
        self.photo_spec = self.catalog.photo(name)?.clone();
        log::debug!(
            "Selected {} ({}x{} px)",
            self.photo_spec.name,
            self.photo_spec.target_width_px(),
            self.photo_spec.target_height_px()
        );
        Ok(())
    }

    pub fn select_paper(&mut self, name: &str) -> Result<(), SessionError> {
        self.paper = self.catalog.paper(name)?.clone();
        Ok(())
    }

    /// Set how many photos go on the print sheet.
    ///
    /// Only the configured choices are accepted.
    pub fn set_photo_count(&mut self, count: u32) -> Result<(), SessionError> {
        if !self.config.photo_count_choices.contains(&count) {
            return Err(SessionError::InvalidPhotoCount(count));
        }
        self.photo_count = count;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: AdjustmentMode) {
        self.mode = mode;
    }

    /// Decode `bytes` as the new source image.
    ///
    /// The view is re-centred at scale 1 and adjustments are reset. A small
    /// image loads anyway with a warning in the report.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<LoadReport, SessionError> {
        let image = decode_image(bytes)?;
        self.set_source(image)
    }

    /// Read and decode an image file as the new source image.
    pub fn load_image_file(&mut self, path: &Path) -> Result<LoadReport, SessionError> {
        let image = load_image_file(path)?;
        self.set_source(image)
    }

    /// Install an already decoded image as the source.
    ///
    /// A pixel buffer that does not match the stated size is rejected and
    /// the current source is kept.
    pub fn set_source(&mut self, image: DecodedImage) -> Result<LoadReport, SessionError> {
        image.validate()?;
        let report = LoadReport {
            width: image.width,
            height: image.height,
            resolution_warning: self.check_size(image.width, image.height),
        };
        if let Some(warning) = &report.resolution_warning {
            log::warn!("{}", warning);
        }

        self.source = Some(image);
        self.view = ViewState::centered(self.config.viewport);
        self.adjustment = AdjustmentState::default();
        Ok(report)
    }

    /// Resolution warning for the current source against the selected spec.
    pub fn resolution_warning(&self) -> Option<ResolutionWarning> {
        self.source
            .as_ref()
            .and_then(|image| self.check_size(image.width, image.height))
    }

    fn check_size(&self, width: u32, height: u32) -> Option<ResolutionWarning> {
        check_resolution(
            (width, height),
            &self.photo_spec,
            self.config.min_resolution_factor,
        )
    }

    /// Move the image by a drag delta in viewport pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    /// Apply one wheel tick. A positive delta zooms in.
    pub fn zoom_wheel(&mut self, delta: f64) {
        self.view
            .zoom_wheel(delta, self.config.zoom_in_factor, self.config.zoom_out_factor);
    }

    /// Replace the view outright.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    /// Set brightness and contrast from slider positions.
    pub fn set_adjustments(&mut self, brightness: f32, contrast: f32) {
        self.adjustment = AdjustmentState::from_sliders(brightness, contrast);
    }

    /// The crop window of the selected spec in the viewport.
    pub fn crop_window(&self) -> CropWindow {
        self.config.viewport.crop_window(self.target_px())
    }

    /// Guides for the current mode and spec, if shown.
    pub fn guide_lines(&self) -> Option<GuideLines> {
        guide_lines_for(self.mode, &self.crop_window(), &self.photo_spec)
    }

    /// The composited ID photo for the current state.
    pub fn cropped_photo(&self) -> Result<DecodedImage, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoImageLoaded)?;
        Ok(compute_crop(
            source,
            &self.config.viewport,
            &self.view,
            &self.adjustment,
            self.target_px(),
            self.photo_spec.bg_color,
        ))
    }

    /// The ID photo as JPEG bytes with the export density tag.
    pub fn export_photo_jpeg(&self) -> Result<Vec<u8>, SessionError> {
        let photo = self.cropped_photo()?;
        self.encode(&photo)
    }

    /// Write the ID photo to `path`. `None` means the user cancelled.
    pub fn save_photo(&self, path: Option<&Path>) -> Result<SaveOutcome, SessionError> {
        let photo = self.cropped_photo()?;
        self.save(&photo, path)
    }

    /// Grid for the selected spec on the selected paper.
    pub fn layout(&self) -> PrintLayoutGrid {
        compute_layout(&self.paper, &self.photo_spec)
    }

    /// Full-resolution print sheet.
    pub fn print_sheet(&self) -> Result<DecodedImage, SessionError> {
        let photo = self.cropped_photo()?;
        Ok(render_sheet(
            &photo,
            &self.photo_spec,
            &self.paper,
            &self.layout(),
            self.photo_count,
        )?)
    }

    /// Reduced print sheet for on-screen preview.
    pub fn print_preview(&self) -> Result<DecodedImage, SessionError> {
        let photo = self.cropped_photo()?;
        Ok(render_preview(
            &photo,
            &self.photo_spec,
            &self.paper,
            &self.layout(),
            self.photo_count,
            self.config.preview_scale,
        )?)
    }

    pub fn export_print_sheet_jpeg(&self) -> Result<Vec<u8>, SessionError> {
        let sheet = self.print_sheet()?;
        self.encode(&sheet)
    }

    /// Write the print sheet to `path`. `None` means the user cancelled.
    pub fn save_print_sheet(&self, path: Option<&Path>) -> Result<SaveOutcome, SessionError> {
        let sheet = self.print_sheet()?;
        self.save(&sheet, path)
    }

    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>, SessionError> {
        Ok(encode_jpeg_with_dpi(
            &image.pixels,
            image.width,
            image.height,
            self.config.jpeg_quality,
            self.config.export_dpi,
        )?)
    }

    fn save(&self, image: &DecodedImage, path: Option<&Path>) -> Result<SaveOutcome, SessionError> {
        let Some(path) = path else {
            return Ok(SaveOutcome::Cancelled);
        };
        save_jpeg_file(path, image, self.config.jpeg_quality, self.config.export_dpi)?;
        Ok(SaveOutcome::Saved)
    }
}

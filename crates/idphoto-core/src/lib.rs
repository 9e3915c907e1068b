//! ID Photo Core - identification photo editing library
//!
//! This crate crops a freely panned and zoomed portrait to a fixed-size
//! identification photo and tiles copies of it onto a printable sheet.
//!
//! The two core algorithms are pure functions of explicit inputs:
//! - [`transform::compute_crop`] maps the view onto the photo canvas
//! - [`layout::compute_layout`] packs photo cells onto a paper sheet
//!
//! [`EditorSession`] carries the interactive state between them.

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod encode;
pub mod guides;
pub mod layout;
pub mod session;
pub mod spec;
pub mod transform;

pub use adjustments::{apply_adjustments, AdjustmentState};
pub use config::{ConfigError, EditorConfig};
pub use decode::{decode_image, load_image_file, DecodeError, DecodedImage};
pub use encode::{encode_jpeg, encode_jpeg_with_dpi, save_jpeg_file, EncodeError};
pub use guides::{AdjustmentMode, GuideLines};
pub use layout::{compute_layout, render_preview, render_sheet, CellPosition, PrintLayoutGrid};
pub use session::{EditorSession, LoadReport, ResolutionWarning, SaveOutcome, SessionError};
pub use spec::{Catalog, CatalogError, PaperSpec, PhotoSpec, RgbColor};
pub use transform::{compute_crop, CropWindow, ViewState, Viewport};

//! The view transform: pan, zoom and the crop onto a fixed-size photo.
//!
//! # Pipeline
//!
//! 1. Brightness and contrast on the original source
//! 2. Uniform scale by the view
//! 3. Intersect with the crop window centred in the viewport
//! 4. Paste onto a background-filled canvas of the target size
//!
//! # Coordinate System
//!
//! - Viewport pixels, origin at the top-left corner
//! - The view offset locates the centre of the scaled image
//! - Scale and offset are unbounded

mod crop;
mod sample;
mod view;

pub use crop::{compute_crop, plan_crop, CropRegion, MAX_SCALED_PIXELS};
pub use view::{CropWindow, PixelRect, ViewState, Viewport};

pub(crate) use crop::paste;

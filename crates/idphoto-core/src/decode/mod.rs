//! Image decoding for the editor.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG portraits into opaque RGB
//! - Exact-size resizing used by the crop transform and the print sheet
//!
//! All operations are synchronous and single-threaded.

mod load;
mod resize;
mod types;

pub use load::{decode_image, load_image_file, SUPPORTED_EXTENSIONS};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

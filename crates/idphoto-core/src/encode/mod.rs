//! Image encoding for saved ID photos and print sheets.
//!
//! Both the single cropped photo and the tiled sheet are written as JPEG
//! with a DPI density tag. All operations are synchronous.

mod jpeg;

pub use jpeg::{encode_jpeg, encode_jpeg_with_dpi, save_jpeg_file, EncodeError};

//! Image loading for ImgEZ.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and GIF files into RGBA pixel buffers
//! - Pre-rotating the buffer according to the EXIF orientation tag
//! - Filtering dropped paths by extension
//! - Thumbnail generation for the history viewer
//!
//! Absent or malformed EXIF data never fails a load; the image is used as
//! decoded.
//!
//! # Examples
//!
//! ```ignore
//! use imgez_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod image_file;
mod resize;
mod types;

pub use image_file::{decode_bytes, decode_file, is_supported_path, SUPPORTED_EXTENSIONS};
pub use resize::generate_thumbnail;
pub use types::{DecodeError, Orientation, PixelBuffer, BYTES_PER_PIXEL};

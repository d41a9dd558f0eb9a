//! Image encoding for saving the working buffer.
//!
//! This module provides functionality for:
//! - Writing the current buffer to a path, format chosen by extension
//! - Encoding to JPEG with configurable quality
//!
//! All operations are synchronous.

mod file;
mod jpeg;

pub use file::{encode_to_path, format_for_path};
pub use jpeg::encode_jpeg;

use thiserror::Error;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The path's extension does not name a supported output format
    #[error("Unsupported output format: '{0}'")]
    UnsupportedFormat(String),

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

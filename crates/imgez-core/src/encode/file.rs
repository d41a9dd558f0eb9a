//! Saving the working buffer to a user-chosen path.

use std::path::Path;

use image::{ImageError, ImageFormat};

use super::jpeg::{encode_jpeg, validate};
use super::EncodeError;
use crate::decode::PixelBuffer;

/// Encode `image` and write it to `path`, choosing the format from the
/// path's extension.
///
/// PNG, BMP and GIF keep the alpha channel; JPEG is flattened over white and
/// written with `jpeg_quality`.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for a missing or unknown
/// extension, `EncodeError::IoError` if the file cannot be written, and
/// `EncodeError::EncodingFailed` if the encoder rejects the buffer.
pub fn encode_to_path(
    image: &PixelBuffer,
    path: &Path,
    jpeg_quality: u8,
) -> Result<(), EncodeError> {
    validate(image)?;

    let format = format_for_path(path)?;
    if format == ImageFormat::Jpeg {
        let bytes = encode_jpeg(image, jpeg_quality)?;
        return std::fs::write(path, bytes).map_err(|e| EncodeError::IoError(e.to_string()));
    }

    let rgba = image.to_rgba_image().ok_or(EncodeError::InvalidPixelData {
        expected: image.width as usize * image.height as usize * 4,
        actual: image.pixels.len(),
    })?;

    rgba.save_with_format(path, format).map_err(|e| match e {
        ImageError::IoError(io) => EncodeError::IoError(io.to_string()),
        other => EncodeError::EncodingFailed(other.to_string()),
    })
}

/// Resolve the output format for a path, limited to the formats this crate
/// is built with.
pub fn format_for_path(path: &Path) -> Result<ImageFormat, EncodeError> {
    let describe = || {
        path.extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp | ImageFormat::Gif)) => {
            Ok(format)
        }
        _ => Err(EncodeError::UnsupportedFormat(describe())),
    }
}

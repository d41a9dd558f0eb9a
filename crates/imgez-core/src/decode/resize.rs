//! Image resizing for history thumbnails.
//!
//! All functions return new `PixelBuffer` instances without modifying the input.

use image::imageops::FilterType;

use super::{DecodeError, PixelBuffer};

/// Generate a thumbnail for the history viewer.
///
/// The result fits within a `size x size` box with the aspect ratio kept;
/// images that already fit are returned unchanged, never upscaled.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero `size` or a source
/// buffer whose length does not match its dimensions.
pub fn generate_thumbnail(image: &PixelBuffer, size: u32) -> Result<PixelBuffer, DecodeError> {
    if size == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= size && image.height <= size {
        return Ok(image.clone());
    }

    let (width, height) = calculate_fit_dimensions(image.width, image.height, size);
    resize(image, width, height)
}

fn resize(image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer, DecodeError> {
    let rgba_image = image.to_rgba_image().ok_or(DecodeError::InvalidFormat)?;
    let resized = image::imageops::resize(&rgba_image, width, height, FilterType::Triangle);
    Ok(PixelBuffer::from_rgba_image(resized))
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

//! JPEG encoding for saving.
//!
//! JPEG has no alpha channel, so transparent pixels (the padding a rotation
//! leaves behind) are composited over white before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::{PixelBuffer, BYTES_PER_PIXEL};

/// Encode an RGBA buffer to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source buffer (RGBA, row-major)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty buffer,
/// `EncodeError::InvalidPixelData` when the pixel length does not match the
/// dimensions and `EncodeError::EncodingFailed` if the encoder rejects it.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let rgb = flatten_over_white(&image.pixels);
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Check that a buffer is non-empty and its pixel length matches its size.
pub(super) fn validate(image: &PixelBuffer) -> Result<(), EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * BYTES_PER_PIXEL;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Drop the alpha channel by blending each pixel onto a white background.
fn flatten_over_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / BYTES_PER_PIXEL * 3);
    for px in rgba.chunks_exact(BYTES_PER_PIXEL) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

//! Cropping a pixel buffer to a rectangle.
//!
//! The crop region is given in image pixels. Regions that extend past the
//! image are clipped to it rather than rejected.

use crate::decode::{PixelBuffer, BYTES_PER_PIXEL};
use crate::geometry::PixelRect;

/// Copy the pixels inside `region` into a new buffer.
///
/// # Returns
///
/// `None` if the region does not overlap the image (after clipping nothing
/// is left), otherwise the cropped buffer.
///
/// # Behavior
///
/// - Regions partly outside the image are intersected with its bounds
/// - A region covering the whole image returns a copy of the original
pub fn apply_crop(image: &PixelBuffer, region: PixelRect) -> Option<PixelBuffer> {
    let region = region.clipped_to(image.width, image.height)?;

    // Fast path: full crop returns a clone
    if region.x == 0 && region.y == 0 && region.width == image.width && region.height == image.height
    {
        return Some(image.clone());
    }

    let src_stride = image.width as usize * BYTES_PER_PIXEL;
    let row_len = region.width as usize * BYTES_PER_PIXEL;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    // Copy pixel data row by row
    for y in region.y..region.bottom() {
        let start = y as usize * src_stride + region.x as usize * BYTES_PER_PIXEL;
        output.extend_from_slice(image.pixels.get(start..start + row_len)?);
    }

    Some(PixelBuffer::new(region.width, region.height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Image rotation with bilinear and Lanczos3 interpolation.
//!
//! Angles are in degrees, positive = clockwise on screen. The canvas grows
//! to the bounding box of the rotated image and the uncovered corners are
//! left fully transparent.
//!
//! # Algorithm
//!
//! Quarter turns are exact pixel permutations and go through
//! `image::imageops`. Every other angle uses inverse mapping: for each
//! output pixel center we find the source position it came from and
//! interpolate there. With `(dx, dy)` measured from the output center:
//!
//! ```text
//! src_x = dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//!
//! Sampling happens on premultiplied alpha, with everything outside the
//! source treated as transparent, so the rotated edges fade out instead of
//! picking up a dark fringe.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::decode::{PixelBuffer, BYTES_PER_PIXEL};

/// Angles closer than this to a quarter turn snap to it.
const ANGLE_EPSILON: f64 = 0.001;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// A rotation that maps pixels exactly onto pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Reduce an angle into `[0, 360)`. Non-finite input becomes `0`.
fn normalize_angle(angle_degrees: f64) -> f64 {
    if !angle_degrees.is_finite() {
        return 0.0;
    }
    angle_degrees.rem_euclid(360.0)
}

fn quarter_turn(normalized: f64) -> Option<QuarterTurn> {
    let near = |target: f64| (normalized - target).abs() < ANGLE_EPSILON;
    if near(0.0) || near(360.0) {
        Some(QuarterTurn::None)
    } else if near(90.0) {
        Some(QuarterTurn::Cw90)
    } else if near(180.0) {
        Some(QuarterTurn::Cw180)
    } else if near(270.0) {
        Some(QuarterTurn::Cw270)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (either direction)
///
/// # Returns
///
/// Tuple of `(new_width, new_height)`:
///
/// ```text
/// new_w = w * |cos θ| + h * |sin θ|
/// new_h = w * |sin θ| + h * |cos θ|
/// ```
///
/// rounded to whole pixels and never smaller than 1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = normalize_angle(angle_degrees);

    match quarter_turn(normalized) {
        Some(QuarterTurn::None) | Some(QuarterTurn::Cw180) => return (width, height),
        Some(QuarterTurn::Cw90) | Some(QuarterTurn::Cw270) => return (height, width),
        None => {}
    }

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center.
///
/// # Arguments
///
/// * `image` - Source buffer
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `filter` - Interpolation method for non-quarter-turn angles
///
/// # Returns
///
/// A new buffer sized to the rotated bounding box. Multiples of 90° are
/// lossless; `0` and `360` return an identical copy.
pub fn apply_rotation(
    image: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> PixelBuffer {
    let normalized = normalize_angle(angle_degrees);

    if image.is_empty() {
        return image.clone();
    }

    if let Some(turn) = quarter_turn(normalized) {
        return rotate_quarter(image, turn);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, normalized);

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = PixelBuffer::transparent(dst_w, dst_h);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Offset of this pixel's center from the output center
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Back to source pixel-index coordinates
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * BYTES_PER_PIXEL;
            output.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&pixel);
        }
    }

    output
}

fn rotate_quarter(image: &PixelBuffer, turn: QuarterTurn) -> PixelBuffer {
    let Some(rgba) = image.to_rgba_image() else {
        return image.clone();
    };
    let rotated = match turn {
        QuarterTurn::None => return image.clone(),
        QuarterTurn::Cw90 => imageops::rotate90(&rgba),
        QuarterTurn::Cw180 => imageops::rotate180(&rgba),
        QuarterTurn::Cw270 => imageops::rotate270(&rgba),
    };
    PixelBuffer::from_rgba_image(rotated)
}

/// Premultiplied RGBA at integer coordinates; transparent outside the image.
#[inline]
fn premultiplied(image: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 4];
    }
    let idx = (py as usize * image.width as usize + px as usize) * BYTES_PER_PIXEL;
    let alpha = image.pixels[idx + 3] as f64;
    let scale = alpha / 255.0;
    [
        image.pixels[idx] as f64 * scale,
        image.pixels[idx + 1] as f64 * scale,
        image.pixels[idx + 2] as f64 * scale,
        alpha,
    ]
}

/// Turn an accumulated premultiplied value back into straight RGBA8.
fn unpremultiply(sum: [f64; 4]) -> [u8; 4] {
    let alpha = sum[3].clamp(0.0, 255.0);
    if alpha < 0.5 {
        return [0; 4];
    }
    let scale = 255.0 / alpha;
    [
        (sum[0] * scale).clamp(0.0, 255.0).round() as u8,
        (sum[1] * scale).clamp(0.0, 255.0).round() as u8,
        (sum[2] * scale).clamp(0.0, 255.0).round() as u8,
        alpha.round() as u8,
    ]
}

/// Sample a pixel using bilinear interpolation over the 4 nearest pixels.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);

    // No source pixel within reach
    if x <= -1.0 || x >= w || y <= -1.0 || y >= h {
        return [0; 4];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x0 + 1, y0);
    let p01 = premultiplied(image, x0, y0 + 1);
    let p11 = premultiplied(image, x0 + 1, y0 + 1);

    let mut sum = [0.0f64; 4];
    for i in 0..4 {
        sum[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    unpremultiply(sum)
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
fn sample_lanczos3(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);

    if x <= -3.0 || x >= w + 2.0 || y <= -3.0 || y >= h + 2.0 {
        return [0; 4];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = premultiplied(image, px, py);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            // Out-of-image taps still count so edges fade to transparent
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return [0; 4];
    }
    for value in &mut sum {
        *value /= weight_sum;
    }

    // Ringing can push color above alpha in premultiplied space
    let alpha = sum[3].clamp(0.0, 255.0);
    for value in &mut sum[..3] {
        *value = (*value).clamp(0.0, alpha);
    }
    sum[3] = alpha;

    unpremultiply(sum)
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
///
/// where sinc(x) = sin(πx) / (πx)
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::tests::test_image;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: four quarter turns bring back the original exactly.
        #[test]
        fn prop_four_quarter_turns_identity(
            (width, height) in (1u32..=24, 1u32..=24),
            clockwise in any::<bool>(),
        ) {
            let img = test_image(width, height);
            let step = if clockwise { 90.0 } else { -90.0 };

            let mut result = img.clone();
            for _ in 0..4 {
                result = apply_rotation(&result, step, InterpolationFilter::Bilinear);
            }
            prop_assert_eq!(result, img);
        }

        /// Property: output size matches the computed bounds for any angle.
        #[test]
        fn prop_output_matches_bounds(
            (width, height) in (1u32..=32, 1u32..=32),
            angle in -720.0f64..720.0,
        ) {
            let img = test_image(width, height);
            let result = apply_rotation(&img, angle, InterpolationFilter::Bilinear);

            prop_assert_eq!((result.width, result.height), compute_rotated_bounds(width, height, angle));
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 4) as usize);
        }
    }
}

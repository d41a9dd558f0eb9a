//! Aspect-fit projection between widget space and relative space.
//!
//! # Algorithm
//!
//! Given the display rect the host allocated for the image, the image is
//! scaled to the largest size that fits while keeping its aspect ratio. One
//! axis fills the display rect exactly; the other is centered with equal
//! margins:
//!
//! ```text
//! image wider than display:  width  = display.width,  height = width / aspect
//! otherwise:                 height = display.height, width  = height * aspect
//! ```
//!
//! Relative coordinates are then a plain linear map over that rect.

use super::{Point, Rect, RelPoint};

/// Compute the sub-rectangle of `display` that the image actually covers.
///
/// Returns `None` for zero image dimensions or an empty/non-finite display
/// rect, so callers never divide by zero.
pub fn fit_image_rect(image_width: u32, image_height: u32, display: Rect) -> Option<Rect> {
    if image_width == 0 || image_height == 0 || display.is_empty() {
        return None;
    }

    let image_aspect = image_width as f64 / image_height as f64;
    let display_aspect = display.width / display.height;

    let actual = if image_aspect > display_aspect {
        // Wider than the display: full width, letterbox top and bottom
        let height = display.width / image_aspect;
        let offset = (display.height - height) / 2.0;
        Rect::new(display.left, display.top + offset, display.width, height)
    } else {
        // Taller (or equal): full height, pillarbox left and right
        let width = display.height * image_aspect;
        let offset = (display.width - width) / 2.0;
        Rect::new(display.left + offset, display.top, width, display.height)
    };

    (!actual.is_empty()).then_some(actual)
}

/// Map a widget point into relative space over `actual`.
///
/// The result is not clamped; points outside `actual` map outside `[0, 1]`.
/// Returns `None` if `actual` is degenerate.
pub fn to_relative(point: Point, actual: Rect) -> Option<RelPoint> {
    if actual.is_empty() || !point.is_finite() {
        return None;
    }
    Some(RelPoint::new(
        (point.x - actual.left) / actual.width,
        (point.y - actual.top) / actual.height,
    ))
}

/// Map a relative point back into widget space over `actual`.
pub fn to_widget(rel: RelPoint, actual: Rect) -> Point {
    Point::new(
        actual.left + rel.x * actual.width,
        actual.top + rel.y * actual.height,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

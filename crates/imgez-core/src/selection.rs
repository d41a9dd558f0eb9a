//! The selection rectangle, stored in relative space.
//!
//! A [`Selection`] always has both corners. "No selection" is the absence of
//! the value (`Option<Selection>`), never a half-filled one.

use serde::{Deserialize, Serialize};

use crate::geometry::{to_relative, to_widget, PixelRect, Rect, RelPoint};

/// Slack added before flooring relative coordinates to pixels, so that
/// `0.29 * 100` lands on pixel 29 rather than 28.
const PIXEL_SNAP_EPSILON: f64 = 1e-9;

/// Two corners of the selection, as fractions of the rendered image area.
///
/// The corners may be in any order; every accessor works on the normalized
/// (min/max) box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: RelPoint,
    pub end: RelPoint,
}

impl Selection {
    pub fn new(start: RelPoint, end: RelPoint) -> Self {
        Self { start, end }
    }

    /// A zero-size selection at a single point, the seed of a new drag.
    pub fn at(point: RelPoint) -> Self {
        Self::new(point, point)
    }

    /// Top-left and bottom-right corners of the normalized box.
    pub fn normalized(&self) -> (RelPoint, RelPoint) {
        (
            RelPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            RelPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    /// True if the box has no area.
    pub fn is_empty(&self) -> bool {
        let (min, max) = self.normalized();
        !(max.x > min.x && max.y > min.y)
    }

    /// The selection in widget space over the given image rect.
    pub fn widget_rect(&self, actual: Rect) -> Rect {
        Rect::from_points(to_widget(self.start, actual), to_widget(self.end, actual))
    }

    /// Inverse of [`Selection::widget_rect`].
    ///
    /// Returns `None` if `actual` is degenerate.
    pub fn from_widget_rect(rect: Rect, actual: Rect) -> Option<Self> {
        Some(Self::new(
            to_relative(rect.top_left(), actual)?,
            to_relative(rect.bottom_right(), actual)?,
        ))
    }

    /// Map to whole pixels of an image of the given size.
    ///
    /// Each corner is scaled and floored independently; the box is then
    /// intersected with the image. Returns `None` when nothing of the image
    /// is covered.
    pub fn pixel_rect(&self, image_width: u32, image_height: u32) -> Option<PixelRect> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let (min, max) = self.normalized();
        let (w, h) = (image_width as f64, image_height as f64);

        let snap = |rel: f64, dim: f64| -> u32 {
            let v = (rel * dim + PIXEL_SNAP_EPSILON).floor();
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, dim) as u32
            }
        };

        let x0 = snap(min.x, w);
        let y0 = snap(min.y, h);
        let x1 = snap(max.x, w);
        let y1 = snap(max.y, h);

        PixelRect::new(x0, y0, x1 - x0, y1 - y0).clipped_to(image_width, image_height)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the pixel rect always lies inside the image.
        #[test]
        fn prop_pixel_rect_inside_image(
            (ax, ay, bx, by) in (-1.0f64..2.0, -1.0f64..2.0, -1.0f64..2.0, -1.0f64..2.0),
            (width, height) in (1u32..=4000, 1u32..=4000),
        ) {
            let sel = Selection::new(RelPoint::new(ax, ay), RelPoint::new(bx, by));
            if let Some(rect) = sel.pixel_rect(width, height) {
                prop_assert!(!rect.is_empty());
                prop_assert!(rect.right() <= width);
                prop_assert!(rect.bottom() <= height);
            }
        }
    }
}

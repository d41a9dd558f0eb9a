//! Coordinate spaces and the conversions between them.
//!
//! Three spaces are involved when the user drags a selection over an image:
//!
//! - **Widget space**: pixels of the host widget, origin at its top-left.
//! - **Relative space**: `[0, 1] x [0, 1]` over the area the image actually
//!   covers on screen. Selections are stored here so they survive resizes.
//! - **Image space**: integer pixels of the current image buffer.
//!
//! The aspect-fit rectangle ([`fit_image_rect`]) is the single place where
//! widget space and relative space are tied together. Every conversion goes
//! through it.

mod edge;
mod projection;

pub use edge::{classify_edge, CursorShape, Edge, Side};
pub use projection::{fit_image_rect, to_relative, to_widget};

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point (or a displacement) in widget space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point in relative space. Values outside `[0, 1]` lie off the image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelPoint {
    pub x: f64,
    pub y: f64,
}

impl RelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }
}

/// An axis-aligned rectangle in widget space.
///
/// Edges are continuous: a rect at `left = 10, width = 20` spans `[10, 30]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rect from its four edges.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Build the normalized rect spanned by two corners in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from_edges(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// True for zero or negative area, and for non-finite geometry.
    pub fn is_empty(&self) -> bool {
        !self.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Inclusive containment: points on the boundary count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// True if `other` lies entirely within this rect (boundaries may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translated(&self, delta: Point) -> Rect {
        Rect::new(
            self.left + delta.x,
            self.top + delta.y,
            self.width,
            self.height,
        )
    }

    /// Grow every side outward by `amount`.
    pub fn inflated(&self, amount: f64) -> Rect {
        Rect::new(
            self.left - amount,
            self.top - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Overlap of two rects. Touching rects yield a zero-area result;
    /// disjoint rects yield `None`.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::from_edges(left, top, right, bottom))
    }

    /// Nearest point inside the rect.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.left, self.right().max(self.left)),
            p.y.clamp(self.top, self.bottom().max(self.top)),
        )
    }
}

/// A rectangle in image space, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip to an image of the given size. Returns `None` if nothing is left.
    pub fn clipped_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        let clipped = PixelRect::new(x, y, right - x, bottom - y);
        (!clipped.is_empty()).then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));

        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert!(a.intersect(&touching).unwrap().is_empty());

        let disjoint = Rect::new(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersect(&disjoint), None);
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(96.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_empty_and_non_finite() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_empty());
        assert!(Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.clamp_point(Point::new(0.0, 50.0)), Point::new(10.0, 30.0));
        assert_eq!(r.clamp_point(Point::new(15.0, 15.0)), Point::new(15.0, 15.0));
    }

    #[test]
    fn test_pixel_rect_clipping() {
        let r = PixelRect::new(80, 40, 50, 50);
        assert_eq!(r.clipped_to(100, 50), Some(PixelRect::new(80, 40, 20, 10)));
        assert_eq!(PixelRect::new(120, 0, 10, 10).clipped_to(100, 50), None);
        assert_eq!(PixelRect::new(0, 0, 0, 10).clipped_to(100, 50), None);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 5.0));
    }
}

//! Edge and corner resizing with a minimum-size floor.
//!
//! # Algorithm
//!
//! Each dragged boundary moves by the pointer delta on its own axis. A
//! boundary may not cross `opposite ∓ min_size`; if it would, it stops at
//! that limit and the axis is reported as clamped. Corners run the two axes
//! independently.
//!
//! The caller advances its pointer anchor by the consumed delta only, so
//! motion past a limit is remembered: a boundary that stopped at the minimum
//! size (or at the image edge) stays put until the pointer comes back across
//! it, then follows the pointer with the original grab offset.
//! [`ResizeLatch`] records which axes are currently frozen at the minimum.

use crate::geometry::{Edge, Point, Rect, Side};

/// Boundary motion smaller than this does not count as releasing a latch.
const LATCH_EPSILON: f64 = 1e-9;

/// Result of [`adjust_rect_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    /// The adjusted rectangle.
    pub rect: Rect,
    /// The part of the requested delta that was actually applied.
    pub consumed: Point,
    /// The horizontal boundary stopped at the minimum size.
    pub hit_x: bool,
    /// The vertical boundary stopped at the minimum size.
    pub hit_y: bool,
}

impl ResizeOutcome {
    pub fn hit_minimum(&self) -> bool {
        self.hit_x || self.hit_y
    }
}

/// Move the boundary (or boundaries) named by `edge` by `delta`.
///
/// `Edge::Move` translates the whole rectangle and never clamps. For every
/// other edge the resulting width and height are at least `min_size` along
/// each axis the edge drags.
pub fn adjust_rect_size(rect: Rect, edge: Edge, delta: Point, min_size: f64) -> ResizeOutcome {
    if edge == Edge::Move {
        return ResizeOutcome {
            rect: rect.translated(delta),
            consumed: delta,
            hit_x: false,
            hit_y: false,
        };
    }

    let (left, right, consumed_x, hit_x) = match edge.horizontal() {
        Some(side) => adjust_axis(rect.left, rect.right(), side, delta.x, min_size),
        None => (rect.left, rect.right(), 0.0, false),
    };
    let (top, bottom, consumed_y, hit_y) = match edge.vertical() {
        Some(side) => adjust_axis(rect.top, rect.bottom(), side, delta.y, min_size),
        None => (rect.top, rect.bottom(), 0.0, false),
    };

    ResizeOutcome {
        rect: Rect::from_edges(left, top, right, bottom),
        consumed: Point::new(consumed_x, consumed_y),
        hit_x,
        hit_y,
    }
}

/// One axis of a resize. Returns `(start, end, consumed, clamped)`.
fn adjust_axis(start: f64, end: f64, side: Side, delta: f64, min_size: f64) -> (f64, f64, f64, bool) {
    match side {
        Side::Start => {
            let limit = end - min_size;
            let candidate = start + delta;
            if candidate > limit {
                (limit, end, limit - start, true)
            } else {
                (candidate, end, delta, false)
            }
        }
        Side::End => {
            let limit = start + min_size;
            let candidate = end + delta;
            if candidate < limit {
                (start, limit, limit - end, true)
            } else {
                (start, candidate, delta, false)
            }
        }
    }
}

/// Shorten `delta` so the boundaries dragged by `edge` stay inside `bounds`.
///
/// `Edge::Move` is returned unchanged; moves are validated as a whole.
pub fn clamp_to_bounds(rect: Rect, edge: Edge, delta: Point, bounds: Rect) -> Point {
    if edge == Edge::Move {
        return delta;
    }
    let dx = match edge.horizontal() {
        Some(side) => {
            let current = boundary(rect.left, rect.right(), side);
            (current + delta.x).clamp(bounds.left, bounds.right()) - current
        }
        None => delta.x,
    };
    let dy = match edge.vertical() {
        Some(side) => {
            let current = boundary(rect.top, rect.bottom(), side);
            (current + delta.y).clamp(bounds.top, bounds.bottom()) - current
        }
        None => delta.y,
    };
    Point::new(dx, dy)
}

/// Frozen boundary positions (widget space) for a resize that hit the
/// minimum size. `None` on an axis means that axis follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeLatch {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

impl ResizeLatch {
    pub fn is_active(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record the result of one resize step.
    ///
    /// An axis that clamped freezes at its boundary. A frozen axis releases
    /// once a step moves its boundary back toward enlarging the rectangle.
    pub fn update(&mut self, edge: Edge, outcome: &ResizeOutcome) {
        let rect = outcome.rect;
        if let Some(side) = edge.horizontal() {
            let pos = boundary(rect.left, rect.right(), side);
            update_axis(&mut self.horizontal, side, outcome.hit_x, outcome.consumed.x, pos, "x");
        }
        if let Some(side) = edge.vertical() {
            let pos = boundary(rect.top, rect.bottom(), side);
            update_axis(&mut self.vertical, side, outcome.hit_y, outcome.consumed.y, pos, "y");
        }
    }
}

fn boundary(start: f64, end: f64, side: Side) -> f64 {
    match side {
        Side::Start => start,
        Side::End => end,
    }
}

fn update_axis(latch: &mut Option<f64>, side: Side, hit: bool, consumed: f64, pos: f64, axis: &str) {
    let enlarging = match side {
        Side::Start => consumed < -LATCH_EPSILON,
        Side::End => consumed > LATCH_EPSILON,
    };
    match *latch {
        None if hit => {
            log::debug!("Resize latched at {axis}={pos:.1}");
            *latch = Some(pos);
        }
        Some(frozen) if !hit && enlarging => {
            log::debug!("Resize latch released at {axis}={frozen:.1}");
            *latch = None;
        }
        _ => {}
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::tests::Drag;
    use super::*;
    use proptest::prelude::*;

    fn edge_strategy() -> impl Strategy<Value = Edge> {
        prop_oneof![
            Just(Edge::Left),
            Just(Edge::Right),
            Just(Edge::Top),
            Just(Edge::Bottom),
            Just(Edge::TopLeft),
            Just(Edge::TopRight),
            Just(Edge::BottomLeft),
            Just(Edge::BottomRight),
        ]
    }

    proptest! {
        /// Property: any sequence of latched resize steps keeps the
        /// rectangle at least `min_size` on both axes.
        #[test]
        fn prop_resize_respects_minimum(
            (left, top) in (-500.0f64..500.0, -500.0f64..500.0),
            (width, height) in (1.0f64..400.0, 1.0f64..400.0),
            min_size in 0.5f64..1.0,
            edge in edge_strategy(),
            moves in prop::collection::vec((-300.0f64..300.0, -300.0f64..300.0), 1..20),
        ) {
            let rect = Rect::new(left, top, width, height);
            // Start the pointer on the grabbed boundary
            let mut pointer = Point::new(
                if edge.horizontal() == Some(Side::End) { rect.right() } else { rect.left },
                if edge.vertical() == Some(Side::End) { rect.bottom() } else { rect.top },
            );
            let mut drag = Drag::new(rect, edge, pointer);

            for (mx, my) in moves {
                pointer = Point::new(pointer.x + mx, pointer.y + my);
                drag.to_with_min(pointer, min_size);

                prop_assert!(drag.rect.width >= min_size - 1e-9, "width {} < {}", drag.rect.width, min_size);
                prop_assert!(drag.rect.height >= min_size - 1e-9, "height {} < {}", drag.rect.height, min_size);
            }
        }

        /// Property: the consumed delta never exceeds the requested one.
        #[test]
        fn prop_consumed_bounded_by_request(
            (width, height) in (1.0f64..400.0, 1.0f64..400.0),
            edge in edge_strategy(),
            (dx, dy) in (-500.0f64..500.0, -500.0f64..500.0),
        ) {
            let rect = Rect::new(0.0, 0.0, width, height);
            let out = adjust_rect_size(rect, edge, Point::new(dx, dy), 1.0);

            prop_assert!(out.consumed.x.abs() <= dx.abs() + 1e-9);
            prop_assert!(out.consumed.y.abs() <= dy.abs() + 1e-9);
            prop_assert_eq!(out.hit_minimum(), out.hit_x || out.hit_y);
        }
    }
}

//! Pointer affordances on a selection rectangle.

use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// Which part of a selection the pointer grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Interior grab: translate the whole selection.
    Move,
}

/// Which end of an axis an edge sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left or top: enlarging moves the boundary toward smaller coordinates.
    Start,
    /// Right or bottom: enlarging moves the boundary toward larger coordinates.
    End,
}

impl Edge {
    /// The horizontal boundary this edge drags, if any.
    pub fn horizontal(self) -> Option<Side> {
        match self {
            Edge::Left | Edge::TopLeft | Edge::BottomLeft => Some(Side::Start),
            Edge::Right | Edge::TopRight | Edge::BottomRight => Some(Side::End),
            Edge::Top | Edge::Bottom | Edge::Move => None,
        }
    }

    /// The vertical boundary this edge drags, if any.
    pub fn vertical(self) -> Option<Side> {
        match self {
            Edge::Top | Edge::TopLeft | Edge::TopRight => Some(Side::Start),
            Edge::Bottom | Edge::BottomLeft | Edge::BottomRight => Some(Side::End),
            Edge::Left | Edge::Right | Edge::Move => None,
        }
    }

    pub fn cursor(self) -> CursorShape {
        match self {
            Edge::Left | Edge::Right => CursorShape::ResizeHorizontal,
            Edge::Top | Edge::Bottom => CursorShape::ResizeVertical,
            Edge::TopLeft | Edge::BottomRight => CursorShape::ResizeDiagonalForward,
            Edge::TopRight | Edge::BottomLeft => CursorShape::ResizeDiagonalBackward,
            Edge::Move => CursorShape::Move,
        }
    }
}

/// Pointer glyph the host should show while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Arrow,
    ResizeHorizontal,
    ResizeVertical,
    /// `\` diagonal (top-left / bottom-right corners).
    ResizeDiagonalForward,
    /// `/` diagonal (top-right / bottom-left corners).
    ResizeDiagonalBackward,
    Move,
}

impl CursorShape {
    pub fn for_edge(edge: Option<Edge>) -> Self {
        edge.map(Edge::cursor).unwrap_or_default()
    }
}

/// Resolve a pointer position to the part of `selection` it would grab.
///
/// A boundary counts as hit when the pointer is strictly closer than
/// `threshold` pixels to it. Corners win over single edges. A point inside
/// the selection but away from every boundary yields [`Edge::Move`].
///
/// Returns `None` if the point lies outside `selection` or outside
/// `bounds` (the area the image covers on screen).
pub fn classify_edge(point: Point, selection: Rect, bounds: Rect, threshold: f64) -> Option<Edge> {
    if !point.is_finite() || selection.is_empty() || bounds.is_empty() {
        return None;
    }
    if !bounds.contains(point) || !selection.contains(point) {
        return None;
    }

    let near_left = (point.x - selection.left).abs() < threshold;
    let near_right = (point.x - selection.right()).abs() < threshold;
    let near_top = (point.y - selection.top).abs() < threshold;
    let near_bottom = (point.y - selection.bottom()).abs() < threshold;

    let edge = match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => Edge::TopLeft,
        (_, true, true, _) => Edge::TopRight,
        (true, _, _, true) => Edge::BottomLeft,
        (_, true, _, true) => Edge::BottomRight,
        (true, _, _, _) => Edge::Left,
        (_, true, _, _) => Edge::Right,
        (_, _, true, _) => Edge::Top,
        (_, _, _, true) => Edge::Bottom,
        _ => Edge::Move,
    };
    Some(edge)
}

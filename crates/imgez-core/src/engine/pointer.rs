//! Pointer gestures: draw, resize, move, hover.

use serde::{Deserialize, Serialize};

use super::{adjust_rect_size, clamp_to_bounds, Engine, InteractionMode};
use crate::error::EngineError;
use crate::geometry::{classify_edge, to_relative, CursorShape, Edge, Point, Rect};
use crate::selection::Selection;

/// Slack for containment checks on rects that went through relative space.
const GEOMETRY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl Engine {
    /// Begin a gesture at `point` (widget coordinates).
    ///
    /// Grabbing a boundary starts a resize, grabbing the interior starts a
    /// move, and anywhere else on the image starts a new selection. Presses
    /// off the image, with a non-primary button, or with no image loaded
    /// are ignored.
    pub fn pointer_down(&mut self, point: Point, button: PointerButton) {
        if button != PointerButton::Primary || !point.is_finite() {
            return;
        }
        let Some(actual) = self.actual else {
            return;
        };
        if !actual.contains(point) {
            return;
        }

        self.anchor = point + self.widget_origin;
        self.latch.clear();

        let grabbed = self
            .selection_rect()
            .and_then(|rect| classify_edge(point, rect, actual, self.config.edge_threshold));

        match grabbed {
            Some(edge) => {
                self.set_mode(InteractionMode::Resizing(edge));
                self.set_cursor(edge.cursor());
            }
            None => {
                let Some(start) = to_relative(point, actual) else {
                    return;
                };
                self.selection = Some(Selection::at(start.clamped()));
                self.set_mode(InteractionMode::Drawing);
                self.selection_changed();
            }
        }
    }

    /// Continue the current gesture, or update the hover cursor when idle.
    pub fn pointer_move(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }
        let Some(actual) = self.actual else {
            return;
        };
        let global = point + self.widget_origin;

        match self.mode {
            InteractionMode::Idle => self.update_hover(point, actual),
            InteractionMode::Drawing => {
                self.anchor = global;
                self.extend_drawing(point, actual);
            }
            InteractionMode::Resizing(Edge::Move) => self.drag_selection(global, actual),
            InteractionMode::Resizing(edge) => self.resize_selection(edge, global, actual),
        }
    }

    /// End the current gesture.
    ///
    /// A press that never dragged leaves an empty selection behind; that
    /// counts as a click on the image and clears the selection.
    pub fn pointer_up(&mut self, _point: Point) {
        let was_drawing = self.mode == InteractionMode::Drawing;
        self.set_mode(InteractionMode::Idle);
        self.latch.clear();

        if was_drawing && self.selection.is_some_and(|sel| sel.is_empty()) {
            self.selection = None;
            self.selection_changed();
        }
    }

    /// Double-click crops to the selection.
    pub fn double_click(&mut self, _point: Point) -> Result<(), EngineError> {
        self.crop()
    }

    /// The widget's top-left corner moved to `origin` (screen coordinates).
    ///
    /// While drawing, the end point follows the pointer's last absolute
    /// position into the moved widget.
    pub fn window_moved(&mut self, origin: Point) {
        if !origin.is_finite() {
            return;
        }
        self.widget_origin = origin;

        if self.mode == InteractionMode::Drawing {
            if let Some(actual) = self.actual {
                let local = self.anchor - origin;
                self.extend_drawing(local, actual);
            }
        }
    }

    fn update_hover(&mut self, point: Point, actual: Rect) {
        let edge = self
            .selection_rect()
            .and_then(|rect| classify_edge(point, rect, actual, self.config.edge_threshold));
        self.set_cursor(CursorShape::for_edge(edge));
    }

    fn extend_drawing(&mut self, point: Point, actual: Rect) {
        let clamped = actual.clamp_point(point);
        let (Some(end), Some(selection)) = (to_relative(clamped, actual), self.selection.as_mut())
        else {
            return;
        };
        selection.end = end.clamped();
        self.selection_changed();
    }

    /// Translate the whole selection, rejecting steps that would leave the image.
    fn drag_selection(&mut self, global: Point, actual: Rect) {
        let Some(rect) = self.selection_rect() else {
            return;
        };
        let moved = rect.translated(global - self.anchor);

        if !actual.inflated(GEOMETRY_EPSILON).contains_rect(&moved) {
            return;
        }
        self.anchor = global;
        self.commit_widget_rect(moved, actual);
    }

    /// Drag the grabbed boundaries toward the pointer.
    ///
    /// The anchor only advances by what was applied, so motion swallowed by
    /// the image edge or the minimum size is paid back before the boundary
    /// moves again.
    fn resize_selection(&mut self, edge: Edge, global: Point, actual: Rect) {
        let Some(rect) = self.selection_rect() else {
            return;
        };
        let delta = clamp_to_bounds(rect, edge, global - self.anchor, actual);
        let outcome = adjust_rect_size(rect, edge, delta, self.config.min_selection_size);
        self.latch.update(edge, &outcome);
        self.anchor = self.anchor + outcome.consumed;
        self.commit_widget_rect(outcome.rect, actual);
    }

    /// Store a widget-space rect as the selection, clipped to the image.
    fn commit_widget_rect(&mut self, rect: Rect, actual: Rect) {
        let Some(clipped) = rect.intersect(&actual) else {
            return;
        };
        if let Some(selection) = Selection::from_widget_rect(clipped, actual) {
            self.selection = Some(selection);
            self.selection_changed();
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

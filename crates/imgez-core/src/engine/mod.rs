//! The selection and edit engine.
//!
//! [`Engine`] owns the working image, the selection, the interaction mode
//! and the undo history. A host forwards pointer events and commands to it
//! and, after each call, drains the queued [`EngineEvent`]s to know what to
//! repaint and what to show in its readout.
//!
//! Pointer positions are given in widget coordinates. The widget's screen
//! origin (see [`Engine::window_moved`]) turns them into absolute positions,
//! so drags keep tracking correctly when the pointer leaves the widget or
//! the window moves mid-gesture.

mod ops;
mod pointer;
mod resize;

pub use ops::ClipboardSink;
pub use pointer::PointerButton;
pub use resize::{adjust_rect_size, clamp_to_bounds, ResizeLatch, ResizeOutcome};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decode::PixelBuffer;
use crate::geometry::{fit_image_rect, CursorShape, Edge, Point, Rect};
use crate::history::History;
use crate::selection::Selection;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Dragging out a new selection.
    Drawing,
    /// Dragging an edge, a corner, or (with [`Edge::Move`]) the whole selection.
    Resizing(Edge),
}

/// The selection as the status line shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readout {
    /// Selection in image pixels.
    Selection {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    Cleared,
}

/// Outbound notification for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    Repaint,
    Readout(Readout),
    Cursor(CursorShape),
}

/// Interactive selection and edit state for a single image.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    image: Option<PixelBuffer>,
    history: History,
    selection: Option<Selection>,
    display: Rect,
    actual: Option<Rect>,
    mode: InteractionMode,
    /// Absolute pointer position the selection last followed. Motion that
    /// was not applied (clamped at the image or the minimum size) stays as
    /// the gap between this and the live pointer.
    anchor: Point,
    latch: ResizeLatch,
    widget_origin: Point,
    cursor: CursorShape,
    events: Vec<EngineEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            history: History::new(config.history_capacity),
            config,
            image: None,
            selection: None,
            display: Rect::default(),
            actual: None,
            mode: InteractionMode::Idle,
            anchor: Point::ZERO,
            latch: ResizeLatch::default(),
            widget_origin: Point::ZERO,
            cursor: CursorShape::Arrow,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current working image.
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The selection in widget coordinates, for painting.
    pub fn selection_rect(&self) -> Option<Rect> {
        let actual = self.actual?;
        Some(self.selection?.widget_rect(actual))
    }

    /// The area the host allocated for the image.
    pub fn display_rect(&self) -> Rect {
        self.display
    }

    /// The part of the display rect the image actually covers.
    pub fn actual_rect(&self) -> Option<Rect> {
        self.actual
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// True while a resize is frozen at the minimum size.
    pub fn is_negative_resize(&self) -> bool {
        self.latch.is_active()
    }

    #[cfg(test)]
    pub(crate) fn latch(&self) -> ResizeLatch {
        self.latch
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// The selection in image pixels, or `Cleared`.
    pub fn readout(&self) -> Readout {
        let rect = self
            .image
            .as_ref()
            .zip(self.selection)
            .and_then(|(image, sel)| sel.pixel_rect(image.width, image.height));
        match rect {
            Some(r) => Readout::Selection {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
            },
            None => Readout::Cleared,
        }
    }

    /// Tell the engine where the image is drawn. Call on every widget resize.
    pub fn set_display_rect(&mut self, display: Rect) {
        self.display = display;
        self.refresh_layout();
        self.events.push(EngineEvent::Repaint);
    }

    /// Recompute the aspect-fit rect from the display rect and image size.
    fn refresh_layout(&mut self) {
        self.actual = self
            .image
            .as_ref()
            .and_then(|image| fit_image_rect(image.width, image.height, self.display));
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            log::debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.events.push(EngineEvent::Cursor(cursor));
        }
    }

    /// Queue a repaint plus a fresh readout.
    fn selection_changed(&mut self) {
        self.events.push(EngineEvent::Repaint);
        self.events.push(EngineEvent::Readout(self.readout()));
    }

    /// Drop the selection and any gesture in progress.
    fn reset_interaction(&mut self) {
        self.selection = None;
        self.set_mode(InteractionMode::Idle);
        self.latch.clear();
    }

    /// Swap in a new working image after an edit, undo or reset.
    fn install_image(&mut self, image: PixelBuffer) {
        self.image = Some(image);
        self.reset_interaction();
        self.refresh_layout();
        self.selection_changed();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Opaque buffer where each pixel encodes its own position.
    pub(crate) fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0, 255]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    /// Engine holding a `width x height` image displayed 1:1 at the origin.
    pub(crate) fn engine_with_image(width: u32, height: u32) -> Engine {
        let mut engine = Engine::default();
        engine.load_buffer(gradient(width, height)).unwrap();
        engine.set_display_rect(Rect::new(0.0, 0.0, width as f64, height as f64));
        engine.drain_events();
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::geometry::RelPoint;

    #[test]
    fn test_new_engine_is_empty() {
        let engine = Engine::default();
        assert!(engine.image().is_none());
        assert!(engine.selection().is_none());
        assert_eq!(engine.mode(), InteractionMode::Idle);
        assert_eq!(engine.readout(), Readout::Cleared);
        assert_eq!(engine.actual_rect(), None);
    }

    #[test]
    fn test_config_is_sanitized() {
        let mut config = EngineConfig::default();
        config.history_capacity = 0;
        let engine = Engine::new(config);
        assert_eq!(engine.config().history_capacity, 2);
        assert_eq!(engine.history().capacity(), 2);
    }

    #[test]
    fn test_display_rect_letterboxes() {
        let mut engine = engine_with_image(100, 50);
        engine.set_display_rect(Rect::new(0.0, 0.0, 400.0, 400.0));

        assert_eq!(engine.actual_rect(), Some(Rect::new(0.0, 100.0, 400.0, 200.0)));
        assert_eq!(engine.drain_events(), vec![EngineEvent::Repaint]);
    }

    #[test]
    fn test_selection_survives_resize() {
        let mut engine = engine_with_image(100, 50);
        engine
            .select_relative(RelPoint::new(0.25, 0.5), RelPoint::new(0.75, 1.0))
            .unwrap();

        engine.set_display_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(
            engine.selection_rect(),
            Some(Rect::new(50.0, 50.0, 100.0, 50.0))
        );
        assert_eq!(
            engine.readout(),
            Readout::Selection {
                x: 25,
                y: 25,
                width: 50,
                height: 25
            }
        );
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut engine = engine_with_image(10, 10);
        engine.clear_selection();
        assert!(!engine.drain_events().is_empty());
        assert!(engine.drain_events().is_empty());
    }
}

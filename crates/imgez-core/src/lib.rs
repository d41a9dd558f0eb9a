//! ImgEZ Core - interactive image trimming library
//!
//! This crate provides the selection and edit engine behind ImgEZ: pointer
//! driven selection drawing, resizing and moving over an aspect-fit image,
//! plus crop, rotate, copy, undo and reset on the working image.
//!
//! # Example
//!
//! ```ignore
//! use imgez_core::{Engine, EngineConfig, Point, PointerButton, Rect};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.load(path)?;
//! engine.set_display_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! engine.pointer_down(Point::new(100.0, 100.0), PointerButton::Primary);
//! engine.pointer_move(Point::new(300.0, 250.0));
//! engine.pointer_up(Point::new(300.0, 250.0));
//! engine.crop()?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod history;
pub mod selection;
pub mod transform;

pub use config::EngineConfig;
pub use decode::{DecodeError, PixelBuffer};
pub use encode::EncodeError;
pub use engine::{
    ClipboardSink, Engine, EngineEvent, InteractionMode, PointerButton, Readout,
};
pub use error::EngineError;
pub use geometry::{CursorShape, Edge, PixelRect, Point, Rect, RelPoint};
pub use history::History;
pub use selection::Selection;
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds, InterpolationFilter};

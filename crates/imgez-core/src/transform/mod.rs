//! Whole-buffer transforms: rotation and cropping.
//!
//! Both operations take a borrowed [`PixelBuffer`](crate::decode::PixelBuffer)
//! and return a new one. Nothing here mutates its input.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop regions are in image pixels
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};

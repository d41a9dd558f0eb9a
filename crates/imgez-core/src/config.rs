//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Distance (widget px) within which the pointer grabs a selection boundary.
pub const EDGE_THRESHOLD: f64 = 5.0;

/// Smallest width/height (widget px) a resize may leave the selection at.
pub const MIN_SIZE: f64 = 1.0;

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Settings for an [`Engine`](crate::Engine).
///
/// Hosts may store this inside their own settings; missing fields fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history snapshots (at least 2).
    pub history_capacity: usize,
    /// Hover/grab distance to a selection boundary, in widget pixels.
    pub edge_threshold: f64,
    /// Minimum selection width and height during resize, in widget pixels.
    pub min_selection_size: f64,
    /// Resampling used by rotate.
    pub rotation_filter: InterpolationFilter,
    /// Quality for `.jpg`/`.jpeg` saves (1-100).
    pub jpeg_quality: u8,
    /// Enables the history viewer.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            edge_threshold: EDGE_THRESHOLD,
            min_selection_size: MIN_SIZE,
            rotation_filter: InterpolationFilter::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            debug: false,
        }
    }
}

impl EngineConfig {
    /// Replace out-of-range values with usable ones.
    pub fn sanitized(mut self) -> Self {
        self.history_capacity = self
            .history_capacity
            .max(crate::history::MIN_HISTORY_CAPACITY);
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            self.edge_threshold = EDGE_THRESHOLD;
        }
        if !self.min_selection_size.is_finite() || self.min_selection_size <= 0.0 {
            self.min_selection_size = MIN_SIZE;
        }
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

//! Errors reported by engine operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Why an engine operation did nothing.
///
/// None of these are fatal; the host shows them as a transient status and
/// the engine state is unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("No selection")]
    NoSelection,

    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to save image: {0}")]
    Encode(#[from] EncodeError),

    #[error("History is empty")]
    HistoryEmpty,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

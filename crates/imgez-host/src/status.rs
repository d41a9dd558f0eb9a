//! Status-line text for command results and the selection readout.

use std::fmt;

use imgez_core::{EngineError, Readout};

/// What the host should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Transient status-line message.
    Info(String),
    /// The command could not run; show prominently.
    Warning(String),
    /// Nothing to report.
    Silent,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Status::Info(text.into())
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Status::Warning(text.into())
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Status::Info(text) | Status::Warning(text) => Some(text),
            Status::Silent => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Status::Warning(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or(""))
    }
}

/// Fixed messages, one per outcome.
pub mod messages {
    pub const NO_IMAGE: &str = "No image";
    pub const NO_IMAGE_TO_SAVE: &str = "No image to save";
    pub const NO_IMAGE_TO_CROP: &str = "No image to crop";
    pub const NO_IMAGE_TO_COPY: &str = "No image to copy";
    pub const NO_SELECTION: &str = "No crop area selected";
    pub const SAVED: &str = "Image saved";
    pub const SAVE_FAILED: &str = "Failed to save image";
    pub const OPEN_FAILED: &str = "Failed to open image";
    pub const CROPPED: &str = "Image cropped";
    pub const ROTATED: &str = "Image rotated";
    pub const COPIED: &str = "Image copied to clipboard";
    pub const COPY_FAILED: &str = "Failed to copy image";
    pub const UNDONE: &str = "Restored previous state";
    pub const RESET: &str = "Restored original image";
    pub const NOTHING_TO_UNDO: &str = "Nothing to undo";
    pub const HISTORY_DISABLED: &str = "History viewer is only available in debug mode";
    pub const UNSUPPORTED_DROP: &str = "Unsupported file type";
}

/// Map an engine failure to the warning shown for it.
///
/// `no_image` is the command-specific text for a missing image.
pub fn warning_for(error: &EngineError, no_image: &str) -> Status {
    let text = match error {
        EngineError::NoImageLoaded => no_image.to_string(),
        EngineError::NoSelection => messages::NO_SELECTION.to_string(),
        EngineError::HistoryEmpty => messages::NOTHING_TO_UNDO.to_string(),
        EngineError::Decode(e) => format!("{}: {e}", messages::OPEN_FAILED),
        EngineError::Encode(e) => format!("{}: {e}", messages::SAVE_FAILED),
        EngineError::Clipboard(e) => format!("{}: {e}", messages::COPY_FAILED),
    };
    Status::Warning(text)
}

/// Readout text for the status bar's permanent label. Empty when cleared.
pub fn format_readout(readout: Readout) -> String {
    match readout {
        Readout::Selection {
            x,
            y,
            width,
            height,
        } => format!("Selection: ({x}, {y}) | W: {width}, H: {height}"),
        Readout::Cleared => String::new(),
    }
}

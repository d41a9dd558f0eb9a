//! ImgEZ Host - command layer for ImgEZ front ends
//!
//! This crate wraps the imgez-core engine for hosts: it dispatches toolbar
//! commands, produces status-line text and talks to the system clipboard.
//! It also carries the headless command line front end.
//!
//! # Module Structure
//!
//! - `command` - Toolbar commands and the [`Session`] that runs them
//! - `status` - Status messages and the selection readout label
//! - `clipboard` - System (arboard) and in-memory clipboard sinks
//! - `step` - Batch edit steps parsed from the command line
//! - `cli` - Argument parsing and batch execution
//!
//! # Usage
//!
//! ```ignore
//! use imgez_host::{Command, Session, SystemClipboard};
//!
//! let mut session = Session::new(EngineConfig::default(), SystemClipboard::new());
//! let status = session.execute(Command::Open("photo.png".into()));
//! ```

pub mod cli;
pub mod clipboard;
pub mod command;
pub mod status;
pub mod step;

// Re-export public types
pub use clipboard::{MemoryClipboard, SystemClipboard};
pub use command::{Command, Session, HISTORY_THUMBNAIL_SIZE};
pub use status::{format_readout, Status};
pub use step::{Step, StepParseError};

/// Get the version of the host crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

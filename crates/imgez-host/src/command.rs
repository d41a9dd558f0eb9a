//! Command dispatch for hosts.
//!
//! A [`Session`] owns the engine and a clipboard sink, runs toolbar-style
//! commands against them and turns each result into a [`Status`].

use std::path::{Path, PathBuf};

use imgez_core::{ClipboardSink, Engine, EngineConfig, EngineEvent, PixelBuffer};

use crate::status::{format_readout, messages, warning_for, Status};

/// Longest edge of the history viewer thumbnails.
pub const HISTORY_THUMBNAIL_SIZE: u32 = 200;

/// A user-level command, one per toolbar action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Save(PathBuf),
    Crop,
    Copy,
    Undo,
    Reset,
    /// Rotate by degrees, positive clockwise.
    Rotate(f64),
    ClearSelection,
    ShowHistory,
}

/// Engine plus clipboard, as driven by one window.
#[derive(Debug)]
pub struct Session<C: ClipboardSink> {
    engine: Engine,
    clipboard: C,
}

impl<C: ClipboardSink> Session<C> {
    pub fn new(config: EngineConfig, clipboard: C) -> Self {
        Self {
            engine: Engine::new(config),
            clipboard,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Direct access for pointer and layout input.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.engine.drain_events()
    }

    /// Current text of the selection readout label.
    pub fn readout_text(&self) -> String {
        format_readout(self.engine.readout())
    }

    /// Run one command and report the result.
    pub fn execute(&mut self, command: Command) -> Status {
        log::debug!("Executing {command:?}");
        match command {
            Command::Open(path) => self.open(&path),
            Command::Save(path) => match self.engine.save(&path) {
                Ok(()) => Status::info(messages::SAVED),
                Err(e) => warning_for(&e, messages::NO_IMAGE_TO_SAVE),
            },
            Command::Crop => match self.engine.crop() {
                Ok(()) => Status::info(messages::CROPPED),
                Err(e) => warning_for(&e, messages::NO_IMAGE_TO_CROP),
            },
            Command::Copy => match self.engine.copy_to_clipboard(&mut self.clipboard) {
                Ok(()) => Status::info(messages::COPIED),
                Err(e) => warning_for(&e, messages::NO_IMAGE_TO_COPY),
            },
            Command::Undo => self.undo(),
            Command::Reset => {
                if self.engine.image().is_none() {
                    return Status::warning(messages::NO_IMAGE);
                }
                match self.engine.reset_to_original() {
                    Ok(()) => Status::info(messages::RESET),
                    Err(e) => warning_for(&e, messages::NO_IMAGE),
                }
            }
            Command::Rotate(angle) => match self.engine.rotate(angle) {
                Ok(()) => Status::info(messages::ROTATED),
                Err(e) => warning_for(&e, messages::NO_IMAGE),
            },
            Command::ClearSelection => {
                self.engine.clear_selection();
                Status::Silent
            }
            Command::ShowHistory => {
                if self.engine.image().is_none() {
                    return Status::warning(messages::NO_IMAGE);
                }
                match self.history_thumbnails() {
                    Some(thumbnails) => {
                        Status::info(format!("History: {} snapshot(s)", thumbnails.len()))
                    }
                    None => Status::warning(messages::HISTORY_DISABLED),
                }
            }
        }
    }

    /// Load the first supported file among `paths`.
    pub fn drop_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Status {
        match self.engine.drop_files(paths) {
            Ok(true) => Status::Silent,
            Ok(false) => Status::warning(messages::UNSUPPORTED_DROP),
            Err(e) => warning_for(&e, messages::NO_IMAGE),
        }
    }

    /// Thumbnails for the history viewer, `None` outside debug mode.
    pub fn history_thumbnails(&self) -> Option<Vec<PixelBuffer>> {
        self.engine.history_thumbnails(HISTORY_THUMBNAIL_SIZE)
    }

    fn open(&mut self, path: &Path) -> Status {
        match self.engine.load(path) {
            Ok(()) => Status::Silent,
            Err(e) => warning_for(&e, messages::NO_IMAGE),
        }
    }

    fn undo(&mut self) -> Status {
        if self.engine.image().is_none() {
            return Status::warning(messages::NO_IMAGE);
        }
        match self.engine.undo() {
            Ok(()) => Status::info(messages::UNDONE),
            Err(e) => warning_for(&e, messages::NO_IMAGE),
        }
    }
}

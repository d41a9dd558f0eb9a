//! Image-level commands: load, save, crop, rotate, undo, reset, copy.
//!
//! Every edit pushes the pre-edit buffer onto the history before the new
//! buffer is installed, and every edit clears the selection.

use std::path::Path;

use super::Engine;
use crate::decode::{self, DecodeError, PixelBuffer};
use crate::encode;
use crate::error::EngineError;
use crate::geometry::RelPoint;
use crate::selection::Selection;
use crate::transform::{apply_crop, apply_rotation};

/// Destination for copied pixels.
pub trait ClipboardSink {
    /// Hand the image to the clipboard. The error text ends up in the status line.
    fn set_image(&mut self, image: &PixelBuffer) -> Result<(), String>;
}

impl Engine {
    /// Decode a file and make it the working image.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Decode` if the file cannot be read or decoded.
    /// The previous image stays loaded in that case.
    pub fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let image = decode::decode_file(path).inspect_err(|e| {
            log::warn!("Failed to load {}: {e}", path.display());
        })?;
        log::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        self.load_buffer(image)
    }

    /// Make `image` the working image and the base of a fresh history.
    ///
    /// Rejects empty buffers and buffers whose pixel data does not match
    /// their dimensions with `DecodeError::InvalidFormat`.
    pub fn load_buffer(&mut self, image: PixelBuffer) -> Result<(), EngineError> {
        if image.is_empty() || !image.is_well_formed() {
            return Err(DecodeError::InvalidFormat.into());
        }
        self.history.reset(image.clone());
        self.install_image(image);
        Ok(())
    }

    /// Load the first dropped path with a supported image extension.
    ///
    /// Returns `Ok(false)` if none of the paths qualifies.
    pub fn drop_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<bool, EngineError> {
        let Some(path) = paths
            .iter()
            .map(AsRef::<Path>::as_ref)
            .find(|p| decode::is_supported_path(p))
        else {
            log::debug!("Ignored drop of {} unsupported path(s)", paths.len());
            return Ok(false);
        };
        self.load(path)?;
        Ok(true)
    }

    /// Write the working image. The format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let image = self.image.as_ref().ok_or(EngineError::NoImageLoaded)?;
        encode::encode_to_path(image, path, self.config.jpeg_quality).inspect_err(|e| {
            log::warn!("Failed to save {}: {e}", path.display());
        })?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Crop the working image to the selection.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` without an image; `NoSelection` when there is no
    /// selection or it covers less than one pixel.
    pub fn crop(&mut self) -> Result<(), EngineError> {
        let image = self.image.as_ref().ok_or(EngineError::NoImageLoaded)?;
        let region = self
            .selection
            .and_then(|sel| sel.pixel_rect(image.width, image.height))
            .ok_or(EngineError::NoSelection)?;
        let cropped = apply_crop(image, region).ok_or(EngineError::NoSelection)?;

        log::info!(
            "Cropped to {}x{} at ({}, {})",
            region.width,
            region.height,
            region.x,
            region.y
        );
        self.commit_edit(cropped);
        Ok(())
    }

    /// Rotate the working image by `angle_degrees` (positive = clockwise).
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<(), EngineError> {
        let image = self.image.as_ref().ok_or(EngineError::NoImageLoaded)?;
        let rotated = apply_rotation(image, angle_degrees, self.config.rotation_filter);

        log::info!(
            "Rotated by {angle_degrees} degrees ({}x{})",
            rotated.width,
            rotated.height
        );
        self.commit_edit(rotated);
        Ok(())
    }

    /// Restore the most recent snapshot and drop it from the history.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let previous = self.history.pop().ok_or(EngineError::HistoryEmpty)?;
        log::info!("Undo ({} snapshot(s) left)", self.history.len());
        self.install_image(previous);
        Ok(())
    }

    /// Restore the base snapshot and discard every other one.
    pub fn reset_to_original(&mut self) -> Result<(), EngineError> {
        let base = self
            .history
            .collapse_to_base()
            .ok_or(EngineError::HistoryEmpty)?;
        log::info!("Reset to original");
        self.install_image(base);
        Ok(())
    }

    /// The pixels a copy would place on the clipboard: the selection if
    /// there is one, otherwise the whole image.
    pub fn selected_region(&self) -> Result<PixelBuffer, EngineError> {
        let image = self.image.as_ref().ok_or(EngineError::NoImageLoaded)?;
        let region = self
            .selection
            .and_then(|sel| sel.pixel_rect(image.width, image.height))
            .and_then(|rect| apply_crop(image, rect));
        Ok(region.unwrap_or_else(|| image.clone()))
    }

    /// Copy the selection (or the whole image) to `clipboard`.
    pub fn copy_to_clipboard(&self, clipboard: &mut dyn ClipboardSink) -> Result<(), EngineError> {
        let region = self.selected_region()?;
        clipboard.set_image(&region).map_err(|e| {
            log::warn!("Clipboard rejected image: {e}");
            EngineError::Clipboard(e)
        })?;
        log::info!("Copied {}x{} to clipboard", region.width, region.height);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.reset_interaction();
        self.selection_changed();
    }

    /// Set the selection directly from two relative corners.
    ///
    /// Corners are clamped into the image.
    pub fn select_relative(&mut self, start: RelPoint, end: RelPoint) -> Result<(), EngineError> {
        if self.image.is_none() {
            return Err(EngineError::NoImageLoaded);
        }
        self.reset_interaction();
        self.selection = Some(Selection::new(start.clamped(), end.clamped()));
        self.selection_changed();
        Ok(())
    }

    /// Thumbnails of every history snapshot, base first.
    ///
    /// Only available with `debug` enabled in the configuration.
    pub fn history_thumbnails(&self, max_edge: u32) -> Option<Vec<PixelBuffer>> {
        if !self.config.debug {
            return None;
        }
        let thumbnails = self
            .history
            .iter()
            .filter_map(|snapshot| decode::generate_thumbnail(snapshot, max_edge).ok())
            .collect();
        Some(thumbnails)
    }

    /// Record the current image in the history and install `edited`.
    fn commit_edit(&mut self, edited: PixelBuffer) {
        if let Some(previous) = self.image.take() {
            self.history.push(previous);
        }
        self.install_image(edited);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{EngineEvent, Readout};
    use super::*;
    use crate::config::EngineConfig;
    use crate::geometry::Rect;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MemoryClipboard {
        images: Vec<PixelBuffer>,
        fail: bool,
    }

    impl ClipboardSink for MemoryClipboard {
        fn set_image(&mut self, image: &PixelBuffer) -> Result<(), String> {
            if self.fail {
                return Err("no display".to_string());
            }
            self.images.push(image.clone());
            Ok(())
        }
    }

    fn select(engine: &mut Engine, x0: f64, y0: f64, x1: f64, y1: f64) {
        engine
            .select_relative(RelPoint::new(x0, y0), RelPoint::new(x1, y1))
            .unwrap();
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("imgez-ops-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_buffer_resets_state() {
        let mut engine = engine_with_image(100, 50);
        select(&mut engine, 0.1, 0.1, 0.5, 0.5);
        engine.rotate(90.0).unwrap();
        assert_eq!(engine.history_len(), 2);

        engine.load_buffer(gradient(30, 30)).unwrap();
        assert_eq!(engine.history_len(), 1);
        assert!(engine.selection().is_none());
        assert_eq!(engine.image().unwrap().width, 30);
        assert_eq!(
            engine.actual_rect(),
            Some(Rect::new(25.0, 0.0, 50.0, 50.0))
        );
    }

    #[test]
    fn test_load_buffer_rejects_empty() {
        let mut engine = Engine::default();
        let result = engine.load_buffer(PixelBuffer::new(0, 0, vec![]));
        assert!(matches!(
            result,
            Err(EngineError::Decode(DecodeError::InvalidFormat))
        ));
        assert!(engine.image().is_none());
    }

    #[test]
    fn test_load_buffer_rejects_length_mismatch() {
        let mut engine = Engine::default();
        let short = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![255; 4],
        };
        assert!(matches!(
            engine.load_buffer(short),
            Err(EngineError::Decode(DecodeError::InvalidFormat))
        ));
        assert!(engine.image().is_none());
        assert!(matches!(engine.rotate(30.0), Err(EngineError::NoImageLoaded)));

        // A previously loaded image survives the rejected buffer
        let mut engine = engine_with_image(4, 4);
        let long = PixelBuffer {
            width: 2,
            height: 2,
            pixels: vec![0; 17],
        };
        assert!(engine.load_buffer(long).is_err());
        assert_eq!(engine.image().unwrap().width, 4);
        assert!(engine.rotate(30.0).is_ok());
    }

    #[test]
    fn test_load_missing_file_keeps_image() {
        let mut engine = engine_with_image(10, 10);
        let result = engine.load(Path::new("/nonexistent/imgez/photo.png"));
        assert!(matches!(
            result,
            Err(EngineError::Decode(DecodeError::IoError(_)))
        ));
        assert_eq!(engine.image().unwrap().width, 10);
    }

    #[test]
    fn test_operations_without_image() {
        let mut engine = Engine::default();
        assert!(matches!(engine.crop(), Err(EngineError::NoImageLoaded)));
        assert!(matches!(engine.rotate(90.0), Err(EngineError::NoImageLoaded)));
        assert!(matches!(engine.undo(), Err(EngineError::HistoryEmpty)));
        assert!(matches!(
            engine.reset_to_original(),
            Err(EngineError::HistoryEmpty)
        ));
        assert!(matches!(
            engine.save(&temp_path("none.png")),
            Err(EngineError::NoImageLoaded)
        ));
        assert!(matches!(
            engine.select_relative(RelPoint::new(0.0, 0.0), RelPoint::new(1.0, 1.0)),
            Err(EngineError::NoImageLoaded)
        ));
        let mut clipboard = MemoryClipboard::default();
        assert!(matches!(
            engine.copy_to_clipboard(&mut clipboard),
            Err(EngineError::NoImageLoaded)
        ));
    }

    #[test]
    fn test_crop_requires_selection() {
        let mut engine = engine_with_image(100, 50);
        assert!(matches!(engine.crop(), Err(EngineError::NoSelection)));

        // Thinner than a pixel
        select(&mut engine, 0.5, 0.1, 0.501, 0.9);
        assert!(matches!(engine.crop(), Err(EngineError::NoSelection)));
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_crop_copies_region_and_clears_selection() {
        let mut engine = engine_with_image(100, 50);
        select(&mut engine, 0.2, 0.2, 0.6, 0.6);
        engine.crop().unwrap();

        let image = engine.image().unwrap();
        assert_eq!((image.width, image.height), (40, 20));
        // gradient encodes (x, y) in the red and green channels
        assert_eq!(image.pixel(0, 0), Some([20, 10, 0, 255]));
        assert_eq!(image.pixel(39, 19), Some([59, 29, 0, 255]));
        assert!(engine.selection().is_none());
        assert_eq!(engine.history_len(), 2);
        assert_eq!(engine.readout(), Readout::Cleared);
    }

    #[test]
    fn test_crop_then_reset_restores_original() {
        let mut engine = engine_with_image(100, 50);
        let original = engine.image().unwrap().clone();

        select(&mut engine, 0.1, 0.3, 0.7, 0.9);
        engine.crop().unwrap();
        assert_ne!(engine.image(), Some(&original));

        engine.reset_to_original().unwrap();
        assert_eq!(engine.image(), Some(&original));
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_reset_after_many_edits_keeps_base() {
        let mut engine = engine_with_image(20, 10);
        let original = engine.image().unwrap().clone();

        // Well past the default capacity of 10
        for _ in 0..15 {
            engine.rotate(90.0).unwrap();
        }
        assert_eq!(engine.history_len(), 10);

        engine.reset_to_original().unwrap();
        assert_eq!(engine.image(), Some(&original));
    }

    #[test]
    fn test_undo_restores_previous_states() {
        let mut engine = engine_with_image(100, 50);
        let original = engine.image().unwrap().clone();

        engine.rotate(90.0).unwrap();
        let rotated = engine.image().unwrap().clone();
        select(&mut engine, 0.0, 0.0, 0.5, 0.5);
        engine.crop().unwrap();

        engine.undo().unwrap();
        assert_eq!(engine.image(), Some(&rotated));
        assert!(engine.selection().is_none());

        engine.undo().unwrap();
        assert_eq!(engine.image(), Some(&original));
    }

    #[test]
    fn test_undo_n_plus_one_fails() {
        let mut engine = engine_with_image(40, 20);
        engine.rotate(90.0).unwrap();
        engine.rotate(45.0).unwrap();
        select(&mut engine, 0.1, 0.1, 0.9, 0.9);
        engine.crop().unwrap();

        let depth = engine.history_len();
        assert_eq!(depth, 4);
        for _ in 0..depth {
            engine.undo().unwrap();
        }
        assert!(matches!(engine.undo(), Err(EngineError::HistoryEmpty)));
        assert!(matches!(
            engine.reset_to_original(),
            Err(EngineError::HistoryEmpty)
        ));
        // The image itself is still there
        assert!(engine.image().is_some());
    }

    #[test]
    fn test_rotate_zero_and_full_turn() {
        let mut engine = engine_with_image(30, 20);
        let original = engine.image().unwrap().clone();

        engine.rotate(0.0).unwrap();
        assert_eq!(engine.image(), Some(&original));
        engine.rotate(360.0).unwrap();
        assert_eq!(engine.image(), Some(&original));
        assert_eq!(engine.history_len(), 3);
    }

    #[test]
    fn test_rotate_updates_layout_and_clears_selection() {
        let mut engine = engine_with_image(100, 50);
        select(&mut engine, 0.1, 0.1, 0.5, 0.5);
        engine.rotate(90.0).unwrap();

        let image = engine.image().unwrap();
        assert_eq!((image.width, image.height), (50, 100));
        assert!(engine.selection().is_none());
        // 50x100 in a 100x50 display
        assert_eq!(
            engine.actual_rect(),
            Some(Rect::new(37.5, 0.0, 25.0, 50.0))
        );
    }

    #[test]
    fn test_rotate_arbitrary_angle_expands() {
        let mut engine = engine_with_image(40, 40);
        engine.rotate(30.0).unwrap();
        let image = engine.image().unwrap();
        assert!(image.width > 40 && image.height > 40);
        // Corner padding is transparent
        assert_eq!(image.pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_copy_selection_or_whole_image() {
        let mut engine = engine_with_image(100, 50);
        let mut clipboard = MemoryClipboard::default();

        engine.copy_to_clipboard(&mut clipboard).unwrap();
        assert_eq!(clipboard.images[0], *engine.image().unwrap());

        select(&mut engine, 0.5, 0.5, 1.0, 1.0);
        engine.copy_to_clipboard(&mut clipboard).unwrap();
        let copied = &clipboard.images[1];
        assert_eq!((copied.width, copied.height), (50, 25));
        assert_eq!(copied.pixel(0, 0), Some([50, 25, 0, 255]));

        // Copy leaves the engine untouched
        assert!(engine.selection().is_some());
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_copy_reports_clipboard_failure() {
        let engine = engine_with_image(10, 10);
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        match engine.copy_to_clipboard(&mut clipboard) {
            Err(EngineError::Clipboard(msg)) => assert_eq!(msg, "no display"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_clear_selection() {
        let mut engine = engine_with_image(100, 50);
        select(&mut engine, 0.1, 0.1, 0.5, 0.5);
        engine.drain_events();

        engine.clear_selection();
        assert!(engine.selection().is_none());
        assert_eq!(
            engine.drain_events(),
            vec![
                EngineEvent::Repaint,
                EngineEvent::Readout(Readout::Cleared)
            ]
        );
    }

    #[test]
    fn test_select_relative_clamps() {
        let mut engine = engine_with_image(100, 50);
        select(&mut engine, -0.5, 0.5, 2.0, 1.5);
        assert_eq!(
            engine.selection(),
            Some(Selection::new(RelPoint::new(0.0, 0.5), RelPoint::new(1.0, 1.0)))
        );
    }

    #[test]
    fn test_history_thumbnails_debug_only() {
        let mut engine = engine_with_image(400, 200);
        assert!(engine.history_thumbnails(200).is_none());

        let mut engine = Engine::new(EngineConfig::default().with_debug(true));
        engine.load_buffer(gradient(400, 200)).unwrap();
        engine.rotate(90.0).unwrap();

        let thumbs = engine.history_thumbnails(200).unwrap();
        assert_eq!(thumbs.len(), 2);
        assert_eq!((thumbs[0].width, thumbs[0].height), (200, 100));
        assert_eq!((thumbs[1].width, thumbs[1].height), (200, 100));
    }

    #[test]
    fn test_save_and_reload_png() {
        let mut engine = engine_with_image(12, 8);
        let path = temp_path("roundtrip.png");

        engine.save(&path).unwrap();
        let original = engine.image().unwrap().clone();
        engine.rotate(90.0).unwrap();

        engine.load(&path).unwrap();
        assert_eq!(engine.image(), Some(&original));
        assert_eq!(engine.history_len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_unsupported_extension() {
        let engine = engine_with_image(4, 4);
        assert!(matches!(
            engine.save(&temp_path("image.tiff")),
            Err(EngineError::Encode(_))
        ));
    }

    #[test]
    fn test_drop_files_picks_first_supported() {
        let mut engine = Engine::default();
        let png = temp_path("dropped.png");
        let writer = engine_with_image(6, 3);
        writer.save(&png).unwrap();

        let dropped = vec![temp_path("notes.txt"), png.clone()];
        assert!(engine.drop_files(&dropped).unwrap());
        assert_eq!(engine.image().map(|i| (i.width, i.height)), Some((6, 3)));

        let unsupported = vec![temp_path("notes.txt")];
        assert!(!engine.drop_files(&unsupported).unwrap());

        let _ = std::fs::remove_file(&png);
    }
}

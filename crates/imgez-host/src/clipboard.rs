//! Clipboard sinks for the copy command.

use std::borrow::Cow;

use imgez_core::{ClipboardSink, PixelBuffer};

/// The operating system clipboard, via `arboard`.
///
/// The connection is opened on first use so that hosts without a display
/// only fail when they actually copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, image: &PixelBuffer) -> Result<(), String> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
            self.inner = Some(clipboard);
        }
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| "clipboard unavailable".to_string())?;

        // arboard takes tightly packed RGBA8, same as PixelBuffer
        let data = arboard::ImageData {
            width: image.width as usize,
            height: image.height as usize,
            bytes: Cow::Borrowed(&image.pixels),
        };
        clipboard.set_image(data).map_err(|e| e.to_string())
    }
}

/// Keeps copied images in memory. Useful for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    images: Vec<PixelBuffer>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied image.
    pub fn last(&self) -> Option<&PixelBuffer> {
        self.images.last()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_image(&mut self, image: &PixelBuffer) -> Result<(), String> {
        self.images.push(image.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_copies() {
        let mut clipboard = MemoryClipboard::new();
        assert!(clipboard.is_empty());

        let first = PixelBuffer::new(1, 1, vec![1, 2, 3, 255]);
        let second = PixelBuffer::new(2, 1, vec![0; 8]);
        clipboard.set_image(&first).unwrap();
        clipboard.set_image(&second).unwrap();

        assert_eq!(clipboard.len(), 2);
        assert_eq!(clipboard.last(), Some(&second));
    }
}

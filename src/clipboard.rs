//! Clipboard access for copying the rendered meme.

use arboard::{Clipboard, ImageData};
use std::borrow::Cow;

use crate::capture::RasterImage;

/// Handler for clipboard operations.
pub struct ClipboardHandler {
    clipboard: Clipboard,
}

impl ClipboardHandler {
    /// Create a new clipboard handler.
    pub fn new() -> Result<Self, arboard::Error> {
        let clipboard = Clipboard::new()?;
        Ok(Self { clipboard })
    }

    /// Write an RGBA image to the system clipboard.
    pub fn set_image(&mut self, raster: &RasterImage) -> Result<(), String> {
        let (width, height) = raster.dimensions();
        let image = ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Borrowed(raster.pixels().as_raw()),
        };
        self.clipboard
            .set_image(image)
            .map_err(|e| format!("Failed to set clipboard image: {}", e))
    }
}

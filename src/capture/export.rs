use image::Rgba;
use reqwest::Url;
use std::path::PathBuf;

use crate::capture::composition::Composition;
use crate::capture::download::Downloader;
use crate::capture::error::{CaptureError, ExportError};
use crate::capture::raster::{capture, CaptureOptions, CaptureRegion, RasterImage};
use crate::capture::text::CaptionFont;
use crate::clipboard::ClipboardHandler;

/// Name every export is saved under.
pub const EXPORT_FILE_NAME: &str = "meme.png";

/// A composition plus where it currently sits on screen.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub composition: Composition,
    /// Vertical scroll of the preview, in composition pixels.
    pub scroll_offset: u32,
}

impl ExportJob {
    pub fn new(composition: Composition, scroll_offset: u32) -> Self {
        Self {
            composition,
            scroll_offset,
        }
    }

    /// Viewport bounds of the composition: scrolled up by `scroll_offset`.
    pub fn region(&self) -> CaptureRegion {
        let (width, height) = self.composition.size();
        CaptureRegion::new(0, -i64::from(self.scroll_offset), width, height)
    }
}

/// Rasterizes compositions and hands them to the downloader or clipboard.
pub struct Exporter {
    font: CaptionFont,
    downloader: Downloader,
    origin: Option<Url>,
}

impl Exporter {
    /// `origin` is the app's own origin (the meme endpoint).
    pub fn new(font: CaptionFont, downloader: Downloader, origin: Option<Url>) -> Self {
        Self {
            font,
            downloader,
            origin,
        }
    }

    /// Cross-origin sources allowed, scroll offset compensated.
    pub fn capture_options(&self, job: &ExportJob) -> CaptureOptions {
        CaptureOptions {
            allow_cross_origin: true,
            origin: self.origin.clone(),
            scroll_x: 0,
            scroll_y: -i64::from(job.scroll_offset),
            background: Rgba([255, 255, 255, 255]),
        }
    }

    pub fn rasterize(&self, job: &ExportJob) -> Result<RasterImage, CaptureError> {
        capture(&job.composition, &self.font, job.region(), &self.capture_options(job))
    }

    /// Rasterizes and saves as `meme.png`.
    pub fn try_export(&self, job: &ExportJob) -> Result<PathBuf, ExportError> {
        let raster = self.rasterize(job)?;
        let data_url = raster.to_data_url()?;
        Ok(self.downloader.save(EXPORT_FILE_NAME, &data_url)?)
    }

    /// Like [`Exporter::try_export`] but failures are only logged.
    pub fn export_composition(&self, job: &ExportJob) -> Option<PathBuf> {
        match self.try_export(job) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Exported meme");
                Some(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "Export failed");
                None
            }
        }
    }

    /// Places the rasterized composition on the system clipboard.
    pub fn copy_composition(&self, job: &ExportJob) -> bool {
        let raster = match self.rasterize(job) {
            Ok(raster) => raster,
            Err(err) => {
                tracing::error!(error = %err, "Clipboard copy failed");
                return false;
            }
        };
        let result = ClipboardHandler::new()
            .map_err(|e| format!("Failed to open clipboard: {}", e))
            .and_then(|mut clipboard| clipboard.set_image(&raster));
        match result {
            Ok(()) => {
                tracing::info!("Copied meme to clipboard");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Clipboard copy failed");
                false
            }
        }
    }
}

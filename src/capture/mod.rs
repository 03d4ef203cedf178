//! Rasterization of the meme composition and saving it as a file.
//!
//! The capture step takes a [`Composition`] (decoded image plus captions),
//! the region it occupies on screen and [`CaptureOptions`], and produces a
//! [`RasterImage`]. [`Exporter`] wires that to a [`Downloader`] writing
//! `meme.png`.

mod composition;
mod download;
mod error;
mod export;
mod raster;
mod text;

pub use composition::{display_size, wrap_words, Composition, CompositionLayout};
pub use download::{decode_data_url, Downloader};
pub use error::{CaptureError, DownloadError, ExportError, FontError};
pub use export::{ExportJob, Exporter, EXPORT_FILE_NAME};
pub use raster::{capture, CaptureOptions, CaptureRegion, RasterImage};
pub use text::CaptionFont;

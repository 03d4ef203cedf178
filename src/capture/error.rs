use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rasterizing a composition.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture region {width}x{height} is empty")]
    EmptyRegion { width: u32, height: u32 },

    /// The image comes from another origin and cross-origin capture is off.
    #[error("Image '{source_url}' is cross-origin and cross-origin capture is disabled")]
    TaintedSource { source_url: String },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors raised while loading a caption font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font '{origin}': {message}")]
    Parse {
        origin: String,
        message: &'static str,
    },
}

/// Errors raised while saving an exported data URL.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Not a base64 data URL")]
    InvalidDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Either half of an export can fail.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

//! Error types for the meme source and the image loader.

use thiserror::Error;

/// Why a random meme could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure.
    #[error("Request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-2xx status.
    #[error("Provider returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not the expected `{ data: { memes: [...] } }` shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),

    /// Provider reported `success: false`.
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// The meme list was empty.
    #[error("Provider returned no memes")]
    Empty,
}

/// Why a meme image could not be loaded into the display surface.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Image request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Image request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode image from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// The decode task was cancelled or panicked.
    #[error("Decoding image from '{url}' was aborted")]
    Aborted { url: String },
}

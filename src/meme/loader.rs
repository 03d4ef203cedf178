use image::RgbaImage;
use reqwest::Client;

use crate::meme::error::ImageLoadError;

/// Downloads and decodes meme images.
#[derive(Clone)]
pub struct ImageLoader {
    client: Client,
}

impl ImageLoader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and decodes it into RGBA pixels.
    pub async fn load(&self, url: &str) -> Result<RgbaImage, ImageLoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ImageLoadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ImageLoadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || decode(&owned_url, &bytes))
            .await
            .map_err(|_| ImageLoadError::Aborted {
                url: url.to_string(),
            })?
    }
}

/// Decodes raw image bytes, guessing the format from content.
fn decode(url: &str, bytes: &[u8]) -> Result<RgbaImage, ImageLoadError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|source| ImageLoadError::Decode {
            url: url.to_string(),
            source,
        })
}

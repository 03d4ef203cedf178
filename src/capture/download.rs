use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::PathBuf;

use crate::capture::error::DownloadError;

/// Saves data URLs as files in one directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    dir: PathBuf,
}

impl Downloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Decodes `data_url` and writes it to `<dir>/<file_name>`, replacing any
    /// existing file.
    pub fn save(&self, file_name: &str, data_url: &str) -> Result<PathBuf, DownloadError> {
        let bytes = decode_data_url(data_url)?;
        let path = self.dir.join(file_name);

        std::fs::create_dir_all(&self.dir).map_err(|source| DownloadError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Extracts the payload of a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, DownloadError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(DownloadError::InvalidDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(DownloadError::InvalidDataUrl)?;
    if !meta.ends_with(";base64") {
        return Err(DownloadError::InvalidDataUrl);
    }
    Ok(STANDARD.decode(payload)?)
}

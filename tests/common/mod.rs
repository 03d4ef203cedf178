//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_provider;

use image::{ImageFormat, Rgba, RgbaImage};
use memegen::capture::CompositionLayout;
use memegen::meme::{IndexPicker, Meme};
use memegen::ui::app::{App, UiCommand};
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out.into_inner()
}

/// A meme pointing at `url`.
pub fn meme(id: &str, url: &str) -> Meme {
    Meme {
        id: id.to_string(),
        name: format!("Meme {}", id),
        url: url.to_string(),
        width: 100,
        height: 50,
        box_count: 2,
    }
}

/// Provider body listing the given `(id, url)` pairs.
pub fn listing_json(memes: &[(&str, &str)]) -> String {
    let entries: Vec<serde_json::Value> = memes
        .iter()
        .map(|(id, url)| {
            serde_json::json!({
                "id": id,
                "name": format!("Meme {}", id),
                "url": url,
                "width": 100,
                "height": 50,
                "box_count": 2
            })
        })
        .collect();
    serde_json::json!({ "success": true, "data": { "memes": entries } }).to_string()
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Always picks the same index.
pub struct FixedPicker(pub usize);

impl IndexPicker for FixedPicker {
    fn pick(&self, _len: usize) -> usize {
        self.0
    }
}

// -- App helpers --------------------------------------------------------------

/// App wired to a command channel the test drains by hand.
pub fn make_app() -> (App, mpsc::Receiver<UiCommand>) {
    let mut app = App::new(CompositionLayout::default());
    let (tx, rx) = mpsc::channel(16);
    app.set_command_sender(tx);
    (app, rx)
}

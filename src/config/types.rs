use crate::capture::CompositionLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Meme-listing endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.imgflip.com/get_memes";

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where memes come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Meme-listing endpoint returning `{ data: { memes: [...] } }`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Total request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// How the composition is rasterized and where it is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `meme.png`. Defaults to the user's download dir.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Display width of the composition in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Caption font size in pixels.
    #[serde(default = "default_caption_px")]
    pub caption_px: f32,
    /// TTF/OTF font for captions. Falls back to common system fonts.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval of the idle event loop in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_width() -> u32 {
    384
}

fn default_caption_px() -> f32 {
    24.0
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            width: default_width(),
            caption_px: default_caption_px(),
            font_path: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl ExportConfig {
    /// Resolved output directory: configured, else downloads, else cwd.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Composition geometry derived from the export settings.
    pub fn layout(&self) -> CompositionLayout {
        CompositionLayout {
            width: self.width,
            caption_px: self.caption_px,
            ..CompositionLayout::default()
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

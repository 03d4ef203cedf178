//! State for the meme widget.

use std::path::PathBuf;

use crate::meme::Meme;
use crate::ui::mvi::UiState;

/// Which caption an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionSlot {
    Top,
    Bottom,
}

impl CaptionSlot {
    pub fn placeholder(self) -> &'static str {
        match self {
            CaptionSlot::Top => "Top Text",
            CaptionSlot::Bottom => "Bottom Text",
        }
    }

    pub fn other(self) -> Self {
        match self {
            CaptionSlot::Top => CaptionSlot::Bottom,
            CaptionSlot::Bottom => CaptionSlot::Top,
        }
    }
}

/// Whether the current meme's image is on screen.
///
/// `Unloaded` is entered on every new meme. A failed load stays `Unloaded`
/// until the next fetch; `failed` only changes what the preview says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReadiness {
    Unloaded { failed: bool },
    Ready,
}

impl Default for ImageReadiness {
    fn default() -> Self {
        ImageReadiness::Unloaded { failed: false }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemeWidgetState {
    /// Meme on display; replaced wholesale on each successful fetch.
    pub current: Option<Meme>,
    /// Bumped on every new meme; tags image-load results.
    pub generation: u64,
    pub readiness: ImageReadiness,
    pub top_caption: String,
    pub bottom_caption: String,
    /// Fetches issued but not yet answered.
    pub pending_fetches: usize,
    pub last_export: Option<PathBuf>,
}

impl UiState for MemeWidgetState {}

impl MemeWidgetState {
    pub fn caption(&self, slot: CaptionSlot) -> &str {
        match slot {
            CaptionSlot::Top => &self.top_caption,
            CaptionSlot::Bottom => &self.bottom_caption,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == ImageReadiness::Ready
    }

    /// The export control is enabled exactly when the image is ready.
    pub fn can_export(&self) -> bool {
        self.is_ready()
    }

    pub fn export_label(&self) -> &'static str {
        if self.can_export() {
            "Download Meme"
        } else {
            "Loading Image..."
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetches > 0
    }
}

//! Intents for the meme widget.

use std::path::PathBuf;

use crate::meme::Meme;
use crate::ui::meme::state::CaptionSlot;
use crate::ui::mvi::Intent;

/// Everything that can happen to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum MemeIntent {
    /// User asked for a new random meme (also sent once on mount).
    FetchRequested,

    /// A fetch completed. Applied in arrival order: the last one wins.
    MemeFetched { meme: Meme },

    /// A fetch failed; the current meme stays.
    FetchFailed,

    /// New full text of one caption.
    CaptionChanged { slot: CaptionSlot, text: String },

    /// Image for `generation` finished decoding.
    ImageLoaded { generation: u64 },

    /// Image for `generation` could not be downloaded or decoded.
    ImageLoadFailed { generation: u64 },

    /// User asked to export the composition. Handled by the caller.
    ExportRequested,

    /// Export finished and was saved to `path`.
    ExportSaved { path: PathBuf },
}

impl Intent for MemeIntent {}

use crate::capture::{display_size, Composition, CompositionLayout, ExportJob};
use crate::ui::meme::{CaptionSlot, MemeIntent, MemeReducer, MemeWidgetState};
use crate::ui::mvi::Reducer;
use image::RgbaImage;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Side effects the app asks the command worker to perform.
#[derive(Debug)]
pub enum UiCommand {
    FetchMeme,
    LoadImage { generation: u64, url: String },
    Export(ExportJob),
    CopyToClipboard(ExportJob),
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Decoded image of the current meme, tagged with its generation.
#[derive(Debug, Clone)]
struct LoadedImage {
    generation: u64,
    pixels: Arc<RgbaImage>,
}

pub struct App {
    should_quit: bool,
    focus: CaptionSlot,
    /// Widget state (MVI pattern).
    pub widget: MemeWidgetState,
    /// Decoded image (resource, managed outside MVI).
    image: Option<LoadedImage>,
    /// Preview scroll in composition pixels.
    scroll_offset: u32,
    layout: CompositionLayout,
    command_sender: Option<UiCommandSender>,
    last_command_error: Option<String>,
}

impl App {
    pub fn new(layout: CompositionLayout) -> Self {
        Self {
            should_quit: false,
            focus: CaptionSlot::Top,
            widget: MemeWidgetState::default(),
            image: None,
            scroll_offset: 0,
            layout,
            command_sender: None,
            last_command_error: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    pub fn last_command_error(&self) -> Option<&str> {
        self.last_command_error.as_deref()
    }

    pub fn layout(&self) -> CompositionLayout {
        self.layout
    }

    /// Initial display: load one random meme.
    pub fn mount(&mut self) {
        self.dispatch(MemeIntent::FetchRequested);
    }

    // ========================================================================
    // Widget dispatch (MVI pattern)
    // ========================================================================

    /// Runs `intent` through the reducer and issues its side effects.
    pub fn dispatch(&mut self, intent: MemeIntent) {
        match &intent {
            MemeIntent::FetchRequested => {
                if !self.send_command(UiCommand::FetchMeme) {
                    return;
                }
            }
            MemeIntent::ExportRequested => {
                if let Some(job) = self.export_job() {
                    self.send_command(UiCommand::Export(job));
                }
            }
            _ => {}
        }

        let fetched = matches!(intent, MemeIntent::MemeFetched { .. });
        dispatch_mvi!(self, widget, MemeReducer, intent);

        if fetched {
            self.image = None;
            self.scroll_offset = 0;
            if let Some(url) = self.widget.current.as_ref().map(|m| m.url.clone()) {
                let generation = self.widget.generation;
                self.send_command(UiCommand::LoadImage { generation, url });
            }
        }
    }

    /// Decoded pixels arrived. Ignored unless they belong to the current meme.
    pub fn on_image_decoded(&mut self, generation: u64, pixels: Arc<RgbaImage>) {
        if generation != self.widget.generation || self.widget.current.is_none() {
            tracing::debug!(generation, current = self.widget.generation, "Dropping stale image");
            return;
        }
        self.image = Some(LoadedImage { generation, pixels });
        self.dispatch(MemeIntent::ImageLoaded { generation });
    }

    /// Decoded image of the current meme, if loaded.
    pub fn image(&self) -> Option<Arc<RgbaImage>> {
        self.image
            .as_ref()
            .filter(|img| img.generation == self.widget.generation)
            .map(|img| Arc::clone(&img.pixels))
    }

    // ========================================================================
    // Captions
    // ========================================================================

    pub fn focus(&self) -> CaptionSlot {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn set_focus(&mut self, slot: CaptionSlot) {
        self.focus = slot;
    }

    pub fn set_caption(&mut self, slot: CaptionSlot, text: impl Into<String>) {
        self.dispatch(MemeIntent::CaptionChanged {
            slot,
            text: text.into(),
        });
    }

    pub fn type_char(&mut self, ch: char) {
        let mut text = self.widget.caption(self.focus).to_string();
        text.push(ch);
        self.set_caption(self.focus, text);
    }

    pub fn on_paste(&mut self, pasted: &str) {
        let mut text = self.widget.caption(self.focus).to_string();
        text.extend(pasted.chars().map(|c| if c.is_control() { ' ' } else { c }));
        self.set_caption(self.focus, text);
    }

    pub fn backspace(&mut self) {
        let mut text = self.widget.caption(self.focus).to_string();
        if text.pop().is_some() {
            self.set_caption(self.focus, text);
        }
    }

    pub fn clear_caption(&mut self) {
        self.set_caption(self.focus, String::new());
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Export control handler. Does nothing while the control is disabled.
    pub fn request_export(&mut self) -> bool {
        if !self.widget.can_export() {
            return false;
        }
        self.dispatch(MemeIntent::ExportRequested);
        true
    }

    /// Copies the composition to the clipboard. Same guard as export.
    pub fn request_copy(&mut self) -> bool {
        if !self.widget.can_export() {
            return false;
        }
        match self.export_job() {
            Some(job) => self.send_command(UiCommand::CopyToClipboard(job)),
            None => false,
        }
    }

    /// Snapshot of the composition as it is currently displayed.
    pub fn export_job(&self) -> Option<ExportJob> {
        let meme = self.widget.current.as_ref()?;
        let image = self.image()?;
        let composition = Composition {
            image,
            source_url: meme.url.clone(),
            top: self.widget.top_caption.clone(),
            bottom: self.widget.bottom_caption.clone(),
            layout: self.layout,
        };
        Some(ExportJob::new(composition, self.scroll_offset))
    }

    // ========================================================================
    // Preview scrolling
    // ========================================================================

    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Scrolls the preview by `delta` composition pixels, clamped to the image.
    pub fn scroll_by(&mut self, delta: i64) {
        let max = self
            .image()
            .map(|img| display_size(img.dimensions(), self.layout.width).1.saturating_sub(1))
            .unwrap_or(0);
        let next = (i64::from(self.scroll_offset) + delta).clamp(0, i64::from(max));
        self.scroll_offset = next as u32;
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.command_sender else {
            tracing::warn!("No command worker attached");
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => {
                self.last_command_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Command send failed");
                self.last_command_error = Some(format!("Command send failed: {}", err));
                false
            }
        }
    }
}

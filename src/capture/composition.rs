use image::RgbaImage;
use std::sync::Arc;

/// Geometry of the on-screen composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionLayout {
    /// Display width in pixels; height follows the image aspect ratio.
    pub width: u32,
    /// Caption font size in pixels.
    pub caption_px: f32,
    /// Distance of the captions from the top and bottom edges.
    pub inset: u32,
}

impl Default for CompositionLayout {
    fn default() -> Self {
        Self {
            width: 384,
            caption_px: 24.0,
            inset: 8,
        }
    }
}

impl CompositionLayout {
    pub fn line_height(&self) -> f32 {
        self.caption_px * 4.0 / 3.0
    }

    /// Widest a caption line may grow before wrapping.
    pub fn caption_max_width(&self) -> f32 {
        self.width.saturating_sub(self.inset * 2).max(1) as f32
    }
}

/// The image plus its overlaid captions: everything the export captures.
#[derive(Clone)]
pub struct Composition {
    pub image: Arc<RgbaImage>,
    pub source_url: String,
    pub top: String,
    pub bottom: String,
    pub layout: CompositionLayout,
}

impl std::fmt::Debug for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composition")
            .field("image", &self.image.dimensions())
            .field("source_url", &self.source_url)
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .field("layout", &self.layout)
            .finish()
    }
}

impl Composition {
    /// Displayed size of the composition in pixels.
    pub fn size(&self) -> (u32, u32) {
        display_size(self.image.dimensions(), self.layout.width)
    }

    pub fn has_captions(&self) -> bool {
        !self.top.trim().is_empty() || !self.bottom.trim().is_empty()
    }
}

/// Scales `(w, h)` to `width`, keeping the aspect ratio. Never returns 0.
pub fn display_size((w, h): (u32, u32), width: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (width.max(1), 1);
    }
    let height = (u64::from(h) * u64::from(width) + u64::from(w) / 2) / u64::from(w);
    (width.max(1), (height as u32).max(1))
}

/// Greedy word wrap. `measure` returns the rendered width of a string.
///
/// Words wider than `max_width` get a line of their own and overflow.
pub fn wrap_words(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

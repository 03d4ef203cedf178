//! Half-block rendering of the meme with its captions overlaid.

use crate::capture::{display_size, wrap_words};
use crate::ui::theme::{CAPTION_TEXT, PLACEHOLDER_TEXT};
use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use std::sync::Arc;

/// Widest the preview grows, in terminal columns.
const MAX_PREVIEW_COLS: u16 = 96;

pub struct MemePreview<'a> {
    image: Option<Arc<RgbaImage>>,
    top: &'a str,
    bottom: &'a str,
    /// Rows hidden above the viewport.
    scroll_rows: u16,
    /// Shown instead of the image while there is none.
    status: &'a str,
}

impl<'a> MemePreview<'a> {
    pub fn new(image: Option<Arc<RgbaImage>>, top: &'a str, bottom: &'a str, status: &'a str) -> Self {
        Self {
            image,
            top,
            bottom,
            scroll_rows: 0,
            status,
        }
    }

    pub fn scroll_rows(mut self, rows: u16) -> Self {
        self.scroll_rows = rows;
        self
    }
}

/// Preview width for an `area` this wide.
pub fn preview_cols(area_width: u16) -> u16 {
    area_width.min(MAX_PREVIEW_COLS)
}

/// Converts a scroll offset in composition pixels into preview rows.
pub fn scroll_rows_for(scroll_px: u32, composition_width: u32, cols: u16) -> u16 {
    if composition_width == 0 {
        return 0;
    }
    // Each row shows two preview pixels.
    let preview_px = u64::from(scroll_px) * u64::from(cols) / u64::from(composition_width);
    (preview_px / 2).min(u64::from(u16::MAX)) as u16
}

impl Widget for MemePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let Some(image) = self.image else {
            let y = area.y + area.height / 2;
            let line = Line::from(self.status);
            let width = (line.width() as u16).min(area.width);
            let x = area.x + (area.width - width) / 2;
            buf.set_line(x, y, &line.style(Style::default().fg(PLACEHOLDER_TEXT)), width);
            return;
        };

        let cols = preview_cols(area.width);
        let (src_w, src_h) = image.dimensions();
        let (_, px_h) = display_size((src_w, src_h), u32::from(cols));
        let total_rows = px_h.div_ceil(2);
        let x0 = area.x + (area.width - cols) / 2;

        for row in 0..area.height {
            let image_row = u32::from(row) + u32::from(self.scroll_rows);
            if image_row >= total_rows {
                break;
            }
            for col in 0..cols {
                let top = sample(&image, col, cols, image_row * 2, px_h);
                let bottom = if image_row * 2 + 1 < px_h {
                    sample(&image, col, cols, image_row * 2 + 1, px_h)
                } else {
                    Color::Reset
                };
                if let Some(cell) = buf.cell_mut((x0 + col, area.y + row)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }

        let caption_style = Style::default()
            .fg(CAPTION_TEXT)
            .add_modifier(Modifier::BOLD);
        let max_width = cols.saturating_sub(2).max(1);
        let measure = |s: &str| Line::from(s).width() as f32;

        let top_lines = wrap_words(self.top, f32::from(max_width), measure);
        for (i, text) in top_lines.iter().enumerate() {
            let row = i as i64 - i64::from(self.scroll_rows);
            draw_caption(buf, area, x0, cols, row, text, caption_style);
        }

        let bottom_lines = wrap_words(self.bottom, f32::from(max_width), measure);
        let first = i64::from(total_rows) - bottom_lines.len() as i64;
        for (i, text) in bottom_lines.iter().enumerate() {
            let row = first + i as i64 - i64::from(self.scroll_rows);
            draw_caption(buf, area, x0, cols, row, text, caption_style);
        }
    }
}

/// Nearest-neighbour colour of preview pixel `(col, py)`.
fn sample(image: &RgbaImage, col: u16, cols: u16, py: u32, px_h: u32) -> Color {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Color::Reset;
    }
    let sx = (u64::from(col) * u64::from(w) / u64::from(cols)).min(u64::from(w - 1)) as u32;
    let sy = (u64::from(py) * u64::from(h) / u64::from(px_h.max(1))).min(u64::from(h - 1)) as u32;
    let [r, g, b, _] = image.get_pixel(sx, sy).0;
    Color::Rgb(r, g, b)
}

fn draw_caption(buf: &mut Buffer, area: Rect, x0: u16, cols: u16, row: i64, text: &str, style: Style) {
    if row < 0 || row >= i64::from(area.height) {
        return;
    }
    let line = Line::from(text);
    let width = (line.width() as u16).min(cols);
    let x = x0 + (cols - width) / 2;
    buf.set_line(x, area.y + row as u16, &line.style(style), width);
}

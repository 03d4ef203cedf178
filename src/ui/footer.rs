use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::path::Path;

const KEY_HINTS: &str =
    " ^N new │ Tab caption │ ^S download │ ^Y copy │ PgUp/PgDn scroll │ ^Q quit";

/// Right-hand side of the footer.
pub enum FooterStatus<'a> {
    Idle,
    Saved(&'a Path),
    Error(&'a str),
}

impl<'a> FooterStatus<'a> {
    /// Errors win over the last export.
    pub fn from_parts(last_export: Option<&'a Path>, command_error: Option<&'a str>) -> Self {
        match (command_error, last_export) {
            (Some(error), _) => FooterStatus::Error(error),
            (None, Some(path)) => FooterStatus::Saved(path),
            (None, None) => FooterStatus::Idle,
        }
    }

    fn text(&self) -> String {
        match self {
            FooterStatus::Idle => format!("v{} ", env!("CARGO_PKG_VERSION")),
            FooterStatus::Saved(path) => format!("saved {} ", path.display()),
            FooterStatus::Error(error) => format!("{} ", error),
        }
    }
}

/// Key hints on the left, status flushed right. `width` is the full row.
pub fn footer_widget(width: u16, status: FooterStatus<'_>) -> Paragraph<'static> {
    let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
    let status_style = match status {
        FooterStatus::Error(_) => Style::default().fg(STATUS_ERROR),
        _ => dim,
    };
    let status_text = status.text();

    // Column counts, not byte lengths: the hints contain box-drawing chars.
    let inner = usize::from(width.saturating_sub(2));
    let used = Line::from(KEY_HINTS).width() + Line::from(status_text.as_str()).width();
    let gap = inner.saturating_sub(used);

    Paragraph::new(Line::from(vec![
        Span::styled(KEY_HINTS, dim),
        Span::raw(" ".repeat(gap)),
        Span::styled(status_text, status_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

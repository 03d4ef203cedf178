use crate::ui::meme::MemeWidgetState;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Title row: app name, then the current meme's name and size.
pub fn header_widget(state: &MemeWidgetState) -> Paragraph<'static> {
    let text_style = Style::default().fg(HEADER_TEXT);
    let separator_style = Style::default().fg(HEADER_SEPARATOR);
    let title_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("  ", text_style),
        Span::styled("Random Meme Generator", title_style),
    ];
    if let Some(meme) = &state.current {
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(meme.name.clone(), text_style));
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(
            format!("{}×{}", meme.width, meme.height),
            text_style,
        ));
    }
    if state.is_fetching() {
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(
            "fetching…",
            text_style.add_modifier(Modifier::DIM),
        ));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

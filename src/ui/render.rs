use crate::ui::app::App;
use crate::ui::footer::{footer_widget, FooterStatus};
use crate::ui::header::header_widget;
use crate::ui::layout::{body_regions, centered_columns, layout_regions};
use crate::ui::meme::{CaptionSlot, ImageReadiness, MemeWidgetState};
use crate::ui::preview::{preview_cols, scroll_rows_for, MemePreview};
use crate::ui::theme::{
    ACCENT, BUTTON_DISABLED, BUTTON_READY, GLOBAL_BORDER, HEADER_TEXT, INPUT_BORDER,
    PLACEHOLDER_TEXT,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const BUTTON_WIDTH: u16 = 24;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(header_widget(&app.widget), header);
    let status = FooterStatus::from_parts(app.widget.last_export.as_deref(), app.last_command_error());
    frame.render_widget(footer_widget(footer.width, status), footer);

    frame.render_widget(Clear, body);
    let regions = body_regions(body);
    draw_preview(frame, app, regions.preview);
    draw_input(frame, app, CaptionSlot::Top, regions.top_input);
    draw_input(frame, app, CaptionSlot::Bottom, regions.bottom_input);
    draw_button(frame, &app.widget, regions.button);
}

fn draw_preview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = preview_cols(inner.width);
    let scroll_rows = scroll_rows_for(app.scroll_offset(), app.layout().width, cols);
    let preview = MemePreview::new(
        app.image(),
        &app.widget.top_caption,
        &app.widget.bottom_caption,
        preview_status(&app.widget),
    )
    .scroll_rows(scroll_rows);
    frame.render_widget(preview, inner);
}

/// What the preview says while it has no image to show.
pub fn preview_status(state: &MemeWidgetState) -> &'static str {
    match (&state.current, state.readiness) {
        (None, _) if state.is_fetching() => "Fetching meme...",
        (None, _) => "No meme loaded",
        (Some(_), ImageReadiness::Unloaded { failed: true }) => "Failed to load image",
        (Some(_), _) => "Loading image...",
    }
}

fn draw_input(frame: &mut Frame<'_>, app: &App, slot: CaptionSlot, area: Rect) {
    if area.height == 0 {
        return;
    }
    let focused = app.focus() == slot;
    let border = if focused { ACCENT } else { INPUT_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    let text = app.widget.caption(slot);
    let line = if text.is_empty() {
        Line::styled(slot.placeholder(), Style::default().fg(PLACEHOLDER_TEXT))
    } else {
        Line::styled(text.to_string(), Style::default().fg(HEADER_TEXT))
    };
    // Keep the end of long captions (where the cursor is) in view.
    let scroll_x = (Line::from(text).width() as u16).saturating_sub(inner.width.saturating_sub(1));
    frame.render_widget(Paragraph::new(line).scroll((0, scroll_x)).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let typed = (Line::from(text).width() as u16).saturating_sub(scroll_x);
        let x = inner.x + typed.min(inner.width - 1);
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_button(frame: &mut Frame<'_>, state: &MemeWidgetState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let (fill, label_style) = if state.can_export() {
        (
            BUTTON_READY,
            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            BUTTON_DISABLED,
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
        )
    };
    let button = centered_columns(area, BUTTON_WIDTH);
    let widget = Paragraph::new(Line::styled(state.export_label(), label_style))
        .alignment(Alignment::Center)
        .style(Style::default().bg(fill))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(fill)),
        );
    frame.render_widget(widget, button);
}

use crate::ui::app::App;
use crate::ui::meme::{CaptionSlot, MemeIntent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Pixels scrolled per PageUp/PageDown.
const SCROLL_STEP_PX: i64 = 48;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || key.code == KeyCode::Esc {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'n') {
        app.dispatch(MemeIntent::FetchRequested);
        return;
    }
    if is_ctrl_char(key, 's') {
        app.request_export();
        return;
    }
    if is_ctrl_char(key, 'y') {
        app.request_copy();
        return;
    }
    if is_ctrl_char(key, 'u') {
        app.clear_caption();
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up => app.set_focus(CaptionSlot::Top),
        KeyCode::Down => app.set_focus(CaptionSlot::Bottom),
        KeyCode::PageUp => app.scroll_by(-SCROLL_STEP_PX),
        KeyCode::PageDown => app.scroll_by(SCROLL_STEP_PX),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.type_char(ch)
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

use ratatui::layout::Rect;

/// Header, body and footer rows of the screen.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Height of one caption input (border + text + border).
pub const INPUT_HEIGHT: u16 = 3;
/// Height of the export control.
pub const BUTTON_HEIGHT: u16 = 3;

/// Preview, top input, bottom input and export control inside the body.
pub struct BodyRegions {
    pub preview: Rect,
    pub top_input: Rect,
    pub bottom_input: Rect,
    pub button: Rect,
}

pub fn body_regions(body: Rect) -> BodyRegions {
    let controls = (INPUT_HEIGHT * 2 + BUTTON_HEIGHT).min(body.height);
    let preview = Rect {
        height: body.height - controls,
        ..body
    };
    let mut y = body.y + preview.height;
    let mut take = |wanted: u16| {
        let bottom = body.y + body.height;
        let height = wanted.min(bottom.saturating_sub(y));
        let rect = Rect {
            x: body.x,
            y,
            width: body.width,
            height,
        };
        y += height;
        rect
    };
    let top_input = take(INPUT_HEIGHT);
    let bottom_input = take(INPUT_HEIGHT);
    let button = take(BUTTON_HEIGHT);
    BodyRegions {
        preview,
        top_input,
        bottom_input,
        button,
    }
}

/// Horizontally centred slice of `area`, at most `width` wide.
pub fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_cover_the_screen() {
        let area = Rect::new(0, 0, 80, 24);
        let (header, body, footer) = layout_regions(area);
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 3);
        assert_eq!(body.height, 18);
        assert_eq!(footer.y, 21);
    }

    #[test]
    fn body_keeps_controls_below_preview() {
        let regions = body_regions(Rect::new(0, 3, 80, 18));
        assert_eq!(regions.preview.height, 9);
        assert_eq!(regions.top_input.y, 12);
        assert_eq!(regions.bottom_input.y, 15);
        assert_eq!(regions.button.y, 18);
        assert_eq!(regions.button.height, 3);
    }

    #[test]
    fn tiny_body_squeezes_preview_first() {
        let regions = body_regions(Rect::new(0, 0, 20, 5));
        assert_eq!(regions.preview.height, 0);
        assert_eq!(regions.top_input.height, 3);
        assert_eq!(regions.bottom_input.height, 2);
        assert_eq!(regions.button.height, 0);
    }

    #[test]
    fn centered_columns_clamps_width() {
        let area = Rect::new(2, 0, 10, 4);
        assert_eq!(centered_columns(area, 4), Rect::new(5, 0, 4, 4));
        assert_eq!(centered_columns(area, 40), area);
    }
}

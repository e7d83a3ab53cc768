//! Screen regions for the single-page layout.

use ratatui::layout::{Constraint, Layout, Rect};

/// Resolved areas: two input fields, the mode selector line, the slice
/// pane, and the help bar.
pub struct AppLayout {
    pub authority: Rect,
    pub path: Rect,
    pub mode: Rect,
    pub slice: Rect,
    pub help: Rect,
}

pub fn create_layout(area: Rect) -> AppLayout {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    AppLayout {
        authority: chunks[0],
        path: chunks[1],
        mode: chunks[2],
        slice: chunks[3],
        help: chunks[4],
    }
}

/// Area for the suggestion dropdown, anchored below the authority field
/// and clipped to the screen.
pub fn dropdown_area(anchor: Rect, screen: Rect, rows: u16) -> Rect {
    let height = rows.clamp(1, 8);
    let y = anchor.y.saturating_add(anchor.height).min(screen.height);
    let available = screen.height.saturating_sub(y);

    Rect {
        x: anchor.x.saturating_add(1),
        y,
        width: anchor.width.saturating_sub(2),
        height: height.min(available),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_covers_the_screen_top_to_bottom() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create_layout(area);
        assert_eq!(layout.authority.y, 0);
        assert_eq!(layout.help.y, 23);
        assert_eq!(layout.slice.height, 24 - 3 - 3 - 1 - 1);
    }

    #[test]
    fn dropdown_sits_under_the_anchor_and_clips() {
        let screen = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 0, 40, 3);

        let area = dropdown_area(anchor, screen, 3);
        assert_eq!(area.y, 3);
        assert_eq!(area.height, 3);
        assert_eq!(area.width, 38);

        // Long lists cap at 8 rows; cramped screens clip further.
        assert_eq!(dropdown_area(anchor, screen, 50).height, 8);
        let short = Rect::new(0, 0, 80, 5);
        assert_eq!(dropdown_area(anchor, short, 50).height, 2);
    }
}

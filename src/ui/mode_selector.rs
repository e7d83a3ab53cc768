//! Radio-style display-density selector.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::slice::DisplayMode;

/// One line of mutually exclusive mode toggles.
pub struct ModeSelector {
    mode: DisplayMode,
}

impl ModeSelector {
    pub fn new(mode: DisplayMode) -> Self {
        Self { mode }
    }
}

impl Widget for ModeSelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" Mode: ")];
        for (i, mode) in DisplayMode::ALL.into_iter().enumerate() {
            let marker = if mode == self.mode { "(*)" } else { "( )" };
            let style = if mode == self.mode {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(
                format!("{marker} {} [M-{}]", mode.label(), i + 1),
                style,
            ));
            spans.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

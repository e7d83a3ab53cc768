//! Authority suggestion dropdown rendered under the authority field.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Clear, List, ListItem, Widget},
};

/// Overlay list of authorities matching the current input.
pub struct SuggestionList<'a> {
    items: &'a [&'a str],
    selected: Option<usize>,
}

impl<'a> SuggestionList<'a> {
    pub fn new(items: &'a [&'a str], selected: Option<usize>) -> Self {
        Self { items, selected }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || self.items.is_empty() {
            return;
        }
        Clear.render(area, buf);

        // Keep the highlighted row in view on lists taller than the area.
        let visible = area.height as usize;
        let offset = match self.selected {
            Some(i) if i >= visible => i + 1 - visible,
            _ => 0,
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, authority)| {
                let style = if self.selected == Some(i) {
                    Style::default()
                        .bg(Color::Cyan)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().bg(Color::DarkGray)
                };
                ListItem::new(format!(" {authority} ")).style(style)
            })
            .collect();

        List::new(items).render(area, buf);
    }
}

//! The display surface: renders the bound slice in the selected density.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::slice::{DisplayMode, Slice};

/// Widget over the currently bound slice. An unbound or empty state
/// renders as a blank pane; failure is communicated only by absence.
pub struct SlicePane<'a> {
    slice: Option<&'a Slice>,
    mode: DisplayMode,
    uri: Option<&'a str>,
    updated: Option<&'a str>,
    scroll: u16,
}

impl<'a> SlicePane<'a> {
    pub fn new(
        slice: Option<&'a Slice>,
        mode: DisplayMode,
        uri: Option<&'a str>,
        updated: Option<&'a str>,
        scroll: u16,
    ) -> Self {
        Self {
            slice,
            mode,
            uri,
            updated,
            scroll,
        }
    }

    fn title(&self) -> String {
        match self.uri {
            Some(uri) => format!(" Slice [{}] {uri} ", self.mode.label()),
            None => format!(" Slice [{}] ", self.mode.label()),
        }
    }
}

impl Widget for SlicePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title());
        if let Some(updated) = self.updated {
            block = block.title_bottom(
                Line::from(format!(" updated {updated} "))
                    .style(Style::default().fg(Color::DarkGray))
                    .right_aligned(),
            );
        }

        let Some(slice) = self.slice else {
            Paragraph::new("")
                .block(block)
                .render(area, buf);
            return;
        };

        match self.mode {
            DisplayMode::Large => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        slice.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                ];
                for row in &slice.rows {
                    let mut spans = Vec::new();
                    if let Some(icon) = &row.icon {
                        spans.push(Span::styled(
                            format!("{icon} "),
                            Style::default().fg(Color::Yellow),
                        ));
                    }
                    spans.push(Span::raw(row.title.clone()));
                    lines.push(Line::from(spans));
                    if let Some(subtitle) = &row.subtitle {
                        lines.push(Line::from(Span::styled(
                            format!("  {subtitle}"),
                            Style::default().fg(Color::Gray),
                        )));
                    }
                }
                Paragraph::new(lines)
                    .block(block)
                    .scroll((self.scroll, 0))
                    .render(area, buf);
            }
            DisplayMode::Small => {
                let row = slice.header_row();
                let mut spans = Vec::new();
                if let Some(icon) = &row.icon {
                    spans.push(Span::styled(
                        format!("{icon} "),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                spans.push(Span::styled(
                    row.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                if let Some(subtitle) = &row.subtitle {
                    spans.push(Span::styled(
                        format!("  {subtitle}"),
                        Style::default().fg(Color::Gray),
                    ));
                }
                Paragraph::new(Line::from(spans))
                    .block(block)
                    .render(area, buf);
            }
            DisplayMode::Shortcut => {
                let (label, icon) = slice.shortcut_label();
                let chip = match icon {
                    Some(icon) => format!("[ {icon} {label} ]"),
                    None => format!("[ {label} ]"),
                };
                Paragraph::new(Line::from(Span::styled(
                    chip,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            }
        }
    }
}

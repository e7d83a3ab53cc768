//! Single-line text inputs: editing state and the widget that renders them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Result of processing a key in a text field
pub enum FieldKeyResult {
    /// No visual change needed
    Continue,
    /// Text changed -- re-run whatever depends on it
    Changed,
}

/// An editable line of text with a byte-indexed cursor. The cursor always
/// sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    /// Replace the contents, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Handle a key event while this field is focused
    pub fn handle_key(&mut self, key: KeyEvent) -> FieldKeyResult {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                FieldKeyResult::Changed
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.text.remove(prev);
                    self.cursor = prev;
                    FieldKeyResult::Changed
                } else {
                    FieldKeyResult::Continue
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    FieldKeyResult::Changed
                } else {
                    FieldKeyResult::Continue
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                FieldKeyResult::Continue
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                FieldKeyResult::Continue
            }
            KeyCode::Home => {
                self.cursor = 0;
                FieldKeyResult::Continue
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                FieldKeyResult::Continue
            }
            _ => FieldKeyResult::Continue,
        }
    }

    /// Start of the char before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }

    /// End of the char under the cursor, or the cursor itself at the end.
    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}

/// Bordered single-line input with an inline cursor when focused.
pub struct InputField<'a> {
    field: &'a TextField,
    title: &'a str,
    focused: bool,
}

impl<'a> InputField<'a> {
    pub fn new(field: &'a TextField, title: &'a str, focused: bool) -> Self {
        Self {
            field,
            title,
            focused,
        }
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let line = if self.focused {
            let cursor = self.field.cursor.min(self.field.text.len());
            let before = &self.field.text[..cursor];
            let rest = &self.field.text[cursor..];
            let (under, after) = match rest.chars().next() {
                Some(c) => rest.split_at(c.len_utf8()),
                None => (" ", ""),
            };
            Line::from(vec![
                Span::raw(before),
                Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(after),
            ])
        } else {
            Line::from(self.field.text.as_str())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

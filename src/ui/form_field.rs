//! Single-line input widget bound to one registration field

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::registration::{Field, FieldError};

/// What a key did to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The value changed
    Edited,
    /// Only the cursor moved
    Moved,
    /// Not a key this widget handles
    Ignored,
}

/// Text input for one field of the draft.
///
/// The cursor counts characters, not bytes, so accented names edit cleanly.
pub struct FormField {
    field: Field,
    value: String,
    cursor_pos: usize,
    max_length: Option<usize>,
}

impl FormField {
    pub fn new(field: Field, value: &str, max_length: Option<usize>) -> Self {
        Self {
            field,
            value: value.to_string(),
            cursor_pos: value.chars().count(),
            max_length,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of a character position
    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Char(c) => {
                if self.max_length.map_or(true, |m| self.char_len() < m) {
                    let at = self.byte_index(self.cursor_pos);
                    self.value.insert(at, c);
                    self.cursor_pos += 1;
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.byte_index(self.cursor_pos);
                    self.value.remove(at);
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.char_len() {
                    let at = self.byte_index(self.cursor_pos);
                    self.value.remove(at);
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                KeyOutcome::Moved
            }
            KeyCode::Right => {
                if self.cursor_pos < self.char_len() {
                    self.cursor_pos += 1;
                }
                KeyOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                KeyOutcome::Moved
            }
            KeyCode::End => {
                self.cursor_pos = self.char_len();
                KeyOutcome::Moved
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Text as drawn: secrets are masked, the focused field shows a cursor
    pub fn display_text(&self, mask: char, focused: bool) -> String {
        let mut chars: Vec<char> = if self.field.is_secret() {
            std::iter::repeat(mask).take(self.char_len()).collect()
        } else {
            self.value.chars().collect()
        };
        if focused {
            chars.insert(self.cursor_pos.min(chars.len()), '|');
        }
        chars.into_iter().collect()
    }

    /// Rows needed: label, input, error
    pub fn render_height(&self) -> u16 {
        3
    }

    /// Render label, input and the error line under it
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        mask: char,
        error: Option<FieldError>,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(1), // Input
                Constraint::Length(1), // Error
            ])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.field.label(), label_style))),
            rows[0],
        );

        let marker = if focused { "> " } else { "  " };
        let input = Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                self.display_text(mask, focused),
                Style::default().fg(if focused { Color::White } else { Color::Gray }),
            ),
        ]);
        frame.render_widget(Paragraph::new(input), rows[1]);

        if let Some(error) = error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(Color::Red),
                ))),
                rows[2],
            );
        }
    }
}

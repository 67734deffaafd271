//! # InputBox Component
//!
//! The chat text area at the bottom of the panel.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Decide what Enter means: submit on wide terminals, newline on narrow ones
//! - Grow with its content and shrink back after a submit
//! - Draw the send button and remember where it is for mouse clicks
//!
//! The buffer is internal state. `wide` is a prop refreshed by the parent
//! from the terminal width before events are routed.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
pub use text_wrap::INITIAL_HEIGHT;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, next_word_boundary, prev_char_boundary,
    prev_word_boundary, wrap_line_count, wrap_options,
};

const SEND_LABEL: &str = " Send ➤ ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User asked to send the (non-blank) buffer. The parent decides whether
    /// to accept it and clears the box when it does.
    SubmitRequested,
    /// Text content or cursor changed
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Terminal is wide enough for Enter to submit (Prop)
    pub wide: bool,
    cursor: CursorState,
    send_button: Rect,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            wide: true,
            cursor: CursorState::new(),
            send_button: Rect::default(),
        }
    }

    /// Empty the buffer after an accepted submit; height snaps back to `INITIAL_HEIGHT`.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height needed to show the whole buffer, capped at `max_height`
    /// (the room the panel has left) and never below `INITIAL_HEIGHT`.
    pub fn calculate_height(&self, content_width: u16, max_height: u16) -> u16 {
        let content_lines = wrap_line_count(&self.buffer, inner_width(content_width));
        (content_lines + VERTICAL_OVERHEAD).min(max_height.max(INITIAL_HEIGHT))
    }

    /// Whether a click at (col, row) hits the send button drawn last frame.
    pub fn send_button_contains(&self, col: u16, row: u16) -> bool {
        self.send_button.contains(Position::new(col, row))
    }

    fn request_submit(&self) -> Option<InputEvent> {
        (!self.buffer.trim().is_empty()).then_some(InputEvent::SubmitRequested)
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }

    /// Only the lines inside the scroll window.
    fn get_visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = self.cursor.scroll_offset as usize;
        let end = (start + self.cursor.visible_lines as usize).min(lines.len());

        lines[start.min(end)..end].join("\n")
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor.visible_lines = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let hint = if self.wide {
            "Enter to send"
        } else {
            "Ctrl+S to send"
        };
        let send_style = if self.buffer.trim().is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" Message ({hint}) "))
            .title_bottom(Line::styled(SEND_LABEL, send_style).right_aligned())
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(self.get_visible_text(area.width)).block(block);
        frame.render_widget(input, area);

        let label_width = unicode_width::UnicodeWidthStr::width(SEND_LABEL) as u16;
        self.send_button = Rect {
            x: (area.x + area.width).saturating_sub(label_width + 1),
            y: (area.y + area.height).saturating_sub(1),
            width: label_width.min(area.width),
            height: 1,
        };

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x + 1, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Paste(text) => self.insert(text),
            // Enter submits on wide terminals; narrow ones keep the native newline
            TuiEvent::Submit if self.wide => self.request_submit(),
            TuiEvent::Submit => self.insert("\n"),
            TuiEvent::ForceSubmit => self.request_submit(),
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft if self.cursor.pos > 0 => {
                self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorRight if self.cursor.pos < self.buffer.len() => {
                self.move_to(next_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            _ => None,
        }
    }
}

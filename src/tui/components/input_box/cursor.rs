//! Cursor position and scroll tracking for the chat input.
//!
//! `CursorState` owns the cursor byte offset, the scroll offset, and the
//! geometry remembered from the last render. The text itself stays in
//! `InputBox`; every method takes `buffer: &str` explicitly.

use super::text_wrap::{BORDER_OFFSET, inner_width, wrap_line_count, wrap_options};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 when everything fits)
    pub scroll_offset: u16,
    /// Content width from the last render (used for vertical movement)
    pub last_content_width: u16,
    /// Text rows the input had room for at the last render
    pub visible_lines: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
            visible_lines: 1,
        }
    }

    /// Back to the start of an empty buffer.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move up (`direction < 0`) or down one wrapped line, keeping the column
    /// where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(buffer, wrap_options(width));
        if lines.is_empty() {
            return false;
        }

        // Byte span of a wrapped line, including the newline that ended it
        let line_byte_span = |line: &str, offset: usize| -> usize {
            let has_newline = offset + line.len() < buffer.len()
                && buffer.as_bytes()[offset + line.len()] == b'\n';
            line.len() + usize::from(has_newline)
        };

        let mut byte_offset = 0;
        let mut current_line_idx = 0;
        let mut column_in_line = 0;

        for (idx, line) in lines.iter().enumerate() {
            if byte_offset + line.len() >= self.pos {
                current_line_idx = idx;
                column_in_line = self.pos - byte_offset;
                break;
            }
            byte_offset += line_byte_span(line, byte_offset);
        }

        let target_line_idx = if direction < 0 {
            if current_line_idx == 0 {
                return false;
            }
            current_line_idx - 1
        } else {
            if current_line_idx >= lines.len() - 1 {
                return false;
            }
            current_line_idx + 1
        };

        let mut target_line_start = 0;
        for line in lines.iter().take(target_line_idx) {
            target_line_start += line_byte_span(line, target_line_start);
        }

        let target_column = column_in_line.min(lines[target_line_idx].len());
        self.pos = target_line_start + target_column;

        true
    }

    /// Wrapped line (0-based) the cursor sits on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line += 1;
        }

        cursor_line
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);
        let visible = self.visible_lines.max(1);

        if total_lines <= visible {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + visible {
            self.scroll_offset = cursor_line.saturating_sub(visible - 1);
        }
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let options = wrap_options(width);
        let text_before_cursor = &buffer[..self.pos];
        let cursor_line = self.calculate_line(buffer, area.width);

        // Column counted from the last newline: textwrap trims trailing spaces
        let last_newline = text_before_cursor
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let logical_line_to_cursor = &text_before_cursor[last_newline..];
        let logical_line_wrapped = textwrap::wrap(logical_line_to_cursor, options);

        let cursor_col = if logical_line_wrapped.is_empty() {
            0
        } else {
            let width_in_prev_segments: usize = logical_line_wrapped
                .iter()
                .take(logical_line_wrapped.len() - 1)
                .map(|seg| seg.width())
                .sum();
            let total = logical_line_to_cursor.width();
            total.saturating_sub(width_in_prev_segments) as u16
        };

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);

        (
            area.x + BORDER_OFFSET + cursor_col,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_vertically_between_lines() {
        let mut cursor = CursorState::new();
        let buffer = "abc\ndef";
        cursor.pos = buffer.len(); // end of "def"

        assert!(cursor.move_vertically(buffer, -1, 80));
        assert_eq!(cursor.pos, 3);
        assert!(!cursor.move_vertically(buffer, -1, 80));
        assert!(cursor.move_vertically(buffer, 1, 80));
        assert_eq!(cursor.pos, 7);
    }

    #[test]
    fn test_scroll_offset_follows_cursor() {
        let mut cursor = CursorState::new();
        cursor.visible_lines = 2;
        let buffer = "1\n2\n3\n4";
        cursor.pos = buffer.len();

        cursor.update_scroll_offset(buffer, 80);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 80);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn test_screen_pos_after_newline() {
        let mut cursor = CursorState::new();
        cursor.visible_lines = 5;
        let buffer = "hi\n";
        cursor.pos = buffer.len();
        let area = Rect::new(0, 10, 40, 4);
        assert_eq!(cursor.screen_pos(buffer, area), (1, 12));
    }
}

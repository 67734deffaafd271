//! # TitleBar Component
//!
//! Header row of the chat panel: title, connection state, status text, and
//! the close button.
//!
//! Purely presentational. All data arrives as props; the only thing kept
//! after rendering is where the close button landed, for mouse hit tests.
//!
//! ```text
//!  Chatbot ● online | Waiting for reply...                    [✕]
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const CLOSE_LABEL: &str = "[✕]";

pub struct TitleBar {
    pub title: String,
    pub status_message: String,
    /// Whether a session identifier is held
    pub connected: bool,
    close_button: Rect,
}

impl TitleBar {
    pub fn new(title: String, status_message: String, connected: bool) -> Self {
        Self {
            title,
            status_message,
            connected,
            close_button: Rect::default(),
        }
    }

    /// Screen rect of the close button from the last render.
    pub fn close_button(&self) -> Rect {
        self.close_button
    }

    pub fn close_button_contains(&self, col: u16, row: u16) -> bool {
        self.close_button.contains(Position::new(col, row))
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (dot, dot_style) = if self.connected {
            ("● online", Style::default().fg(Color::Green))
        } else {
            ("○ offline", Style::default().fg(Color::DarkGray))
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(dot, dot_style),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);

        let close_width = unicode_width::UnicodeWidthStr::width(CLOSE_LABEL) as u16;
        self.close_button = Rect {
            x: (area.x + area.width).saturating_sub(close_width),
            y: area.y,
            width: close_width.min(area.width),
            height: area.height.min(1),
        };
        frame.render_widget(
            Span::styled(CLOSE_LABEL, Style::default().fg(Color::Red)),
            self.close_button,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_connected_with_status() {
        let mut title_bar =
            TitleBar::new("Chatbot".to_string(), "Waiting for reply...".to_string(), true);
        let text = render_text(&mut title_bar);

        assert!(text.contains("Chatbot"));
        assert!(text.contains("online"));
        assert!(text.contains("Waiting for reply..."));
        assert!(text.contains('✕'));
    }

    #[test]
    fn test_title_bar_offline_without_status() {
        let mut title_bar = TitleBar::new("Chatbot".to_string(), String::new(), false);
        let text = render_text(&mut title_bar);

        assert!(text.contains("offline"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_close_button_hit_area() {
        let mut title_bar = TitleBar::new("Chatbot".to_string(), String::new(), false);
        render_text(&mut title_bar);

        assert!(title_bar.close_button_contains(58, 0));
        assert!(!title_bar.close_button_contains(2, 0));
    }
}

//! # Launcher Component
//!
//! What the screen shows while the chat panel is hidden: a short hint and
//! the toggler button in the bottom-right corner.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

const TOGGLER_LABEL: &str = "💬 Chat";
const TOGGLER_WIDTH: u16 = 12;
const TOGGLER_HEIGHT: u16 = 3;

pub struct Launcher {
    pub title: String,
    toggler: Rect,
}

impl Launcher {
    pub fn new(title: String) -> Self {
        Self {
            title,
            toggler: Rect::default(),
        }
    }

    /// Where the toggler button goes inside `area`.
    pub fn toggler_rect(area: Rect) -> Rect {
        let width = TOGGLER_WIDTH.min(area.width);
        let height = TOGGLER_HEIGHT.min(area.height);
        Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - height,
            width,
            height,
        }
    }

    pub fn toggler_contains(&self, col: u16, row: u16) -> bool {
        self.toggler.contains(Position::new(col, row))
    }
}

impl Component for Launcher {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.title.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Ctrl+T or click the button to chat · Ctrl+C to quit",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);

        self.toggler = Self::toggler_rect(area);
        let button = Paragraph::new(TOGGLER_LABEL)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::bordered().border_type(BorderType::Rounded));
        frame.render_widget(button, self.toggler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_toggler_sits_bottom_right() {
        let rect = Launcher::toggler_rect(Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(68, 21, 12, 3));
    }

    #[test]
    fn test_toggler_clamps_to_tiny_area() {
        let rect = Launcher::toggler_rect(Rect::new(0, 0, 5, 2));
        assert_eq!(rect, Rect::new(0, 0, 5, 2));
    }

    #[test]
    fn test_render_records_toggler() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut launcher = Launcher::new("Chatbot".to_string());

        terminal.draw(|f| launcher.render(f, f.area())).unwrap();

        assert!(launcher.toggler_contains(70, 22));
        assert!(!launcher.toggler_contains(0, 0));

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Chatbot"));
        assert!(text.contains("Chat"));
    }
}

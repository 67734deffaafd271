use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::entry::{ChatEntry, Origin};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity above which the placeholder border turns BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity above which the placeholder border leaves DIM.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// Bubbles take this share of the list width, leaving a gutter on the far side.
const BUBBLE_WIDTH_PERCENT: u16 = 80;
/// Below this list width bubbles use the full width.
const MIN_BUBBLE_WIDTH: u16 = 24;

/// A single chat bubble.
///
/// `Message` is a transient component: created each frame with borrowed
/// text, no state of its own. Outgoing bubbles hug the right edge, incoming
/// ones the left, like the panel it stands in for.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub origin: Origin,
    pub text: &'a str,
    /// `HH:MM` label; the greeting has none.
    pub time: Option<&'a str>,
    pub transient: bool,
    /// Current pulse intensity (0.0 to 1.0) for the waiting animation
    pub pulse_intensity: f32,
}

impl<'a> Message<'a> {
    pub fn from_entry(entry: &'a ChatEntry, time: &'a str, pulse_intensity: f32) -> Self {
        Self {
            origin: entry.origin,
            text: &entry.text,
            time: Some(time),
            transient: entry.transient,
            pulse_intensity,
        }
    }

    pub fn greeting(text: &'a str) -> Self {
        Self {
            origin: Origin::Incoming,
            text,
            time: None,
            transient: false,
            pulse_intensity: 0.0,
        }
    }

    /// Width of a bubble inside a list `list_width` columns wide.
    pub fn bubble_width(list_width: u16) -> u16 {
        if list_width <= MIN_BUBBLE_WIDTH {
            return list_width;
        }
        (list_width * BUBBLE_WIDTH_PERCENT / 100).max(MIN_BUBBLE_WIDTH)
    }

    /// Where the bubble sits within a row of the list.
    pub fn bubble_rect(origin: Origin, row: Rect) -> Rect {
        let width = Self::bubble_width(row.width);
        let x = match origin {
            Origin::Outgoing => row.x + row.width - width,
            Origin::Incoming => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }

    /// Rows this text needs inside a list `list_width` columns wide.
    ///
    /// Uses `textwrap` with options matching ratatui's `Paragraph` wrapping so
    /// the list can size its scroll canvas without rendering.
    pub fn calculate_height(text: &str, list_width: u16) -> u16 {
        let content_width = Self::bubble_width(list_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn style(&self) -> Style {
        if self.transient {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
        }
        match self.origin {
            Origin::Outgoing => Style::default().fg(Color::Cyan),
            Origin::Incoming => Style::default().fg(Color::Green),
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let mut border_style = style.add_modifier(Modifier::DIM);

        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let role = match self.origin {
            Origin::Outgoing => "you",
            Origin::Incoming => "bot",
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(role)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(time) = self.time {
            block = block.title(Line::from(time).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        assert_eq!(Message::calculate_height("", 80), VERTICAL_OVERHEAD);
        assert_eq!(Message::calculate_height("  \n\t ", 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        assert_eq!(Message::calculate_height("Hello", 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_inside_bubble() {
        // Narrow list: bubble is full width (20), content width 16
        // "aaaaaaaaaaaaaaaaaaaa" (20 chars) breaks into 16 + 4
        assert_eq!(
            Message::calculate_height("aaaaaaaaaaaaaaaaaaaa", 20),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(Message::calculate_height("Hello", 0), 1);
    }

    #[test]
    fn bubble_width_scales_with_list() {
        assert_eq!(Message::bubble_width(20), 20);
        assert_eq!(Message::bubble_width(100), 80);
        assert_eq!(Message::bubble_width(28), 24);
    }

    #[test]
    fn outgoing_bubbles_align_right() {
        let row = Rect::new(0, 5, 100, 3);
        assert_eq!(Message::bubble_rect(Origin::Outgoing, row), Rect::new(20, 5, 80, 3));
        assert_eq!(Message::bubble_rect(Origin::Incoming, row), Rect::new(0, 5, 80, 3));
    }

    #[test]
    fn placeholder_is_dim_italic() {
        let msg = Message {
            origin: Origin::Incoming,
            text: "Thinking...",
            time: None,
            transient: true,
            pulse_intensity: 0.0,
        };
        let style = msg.style();
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn origins_get_distinct_colors() {
        assert_eq!(Message::greeting("hi").style().fg, Some(Color::Green));
        let outgoing = Message {
            origin: Origin::Outgoing,
            ..Message::greeting("hi")
        };
        assert_eq!(outgoing.style().fg, Some(Color::Cyan));
    }
}

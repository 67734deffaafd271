//! # MessageList Component
//!
//! Scrollable view of the conversation: the greeting bubble followed by
//! every entry.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the entries (props).
//! Heights are cached per entry id, so appends only measure the new bubble
//! and removing the placeholder only drops its row.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::entry::{ChatEntry, EntryId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Blank rows between bubbles.
const GAP: u16 = 0;

/// Scroll and layout state, persisted in `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// Auto-scroll to the newest bubble on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never passes the last bubble.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Per-row heights. Row 0 is the greeting; row `i + 1` is `entries[i]`.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    /// Entry id measured at each row after the greeting
    ids: Vec<EntryId>,
    content_width: u16,
    greeting: String,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            ids: Vec::new(),
            content_width: 0,
            greeting: String::new(),
        }
    }

    /// Re-measure whatever changed since the last frame.
    pub fn update(&mut self, greeting: &str, entries: &[ChatEntry], content_width: u16) {
        if self.content_width != content_width {
            self.heights.clear();
            self.ids.clear();
        }

        // Entries are append-only apart from placeholder removal, so the
        // matching id prefix keeps its heights.
        let reusable = self
            .ids
            .iter()
            .zip(entries)
            .take_while(|(id, entry)| **id == entry.id)
            .count();
        self.ids.truncate(reusable);
        self.heights.truncate(reusable + 1);

        if self.heights.is_empty() || self.greeting != greeting {
            let greeting_height = Message::calculate_height(greeting, content_width) + GAP;
            match self.heights.first_mut() {
                Some(h) => *h = greeting_height,
                None => self.heights.push(greeting_height),
            }
        }

        for entry in &entries[reusable..] {
            self.heights
                .push(Message::calculate_height(&entry.text, content_width) + GAP);
            self.ids.push(entry.id);
        }

        self.content_width = content_width;
        if self.greeting != greeting {
            self.greeting = greeting.to_string();
        }
        self.rebuild_prefix_heights();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Rows overlapping the viewport, with half a screen of slack either side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub greeting: &'a str,
    pub entries: &'a [ChatEntry],
    pub pulse_value: f32,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        greeting: &'a str,
        entries: &'a [ChatEntry],
        pulse_value: f32,
    ) -> Self {
        Self {
            state,
            greeting,
            entries,
            pulse_value,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state
            .layout
            .update(self.greeting, self.entries, content_width);
        let total_height = self.state.layout.total_height();

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        let time_labels: Vec<String> = self.entries.iter().map(ChatEntry::time_label).collect();

        for row in visible_range {
            let height = self.state.layout.heights[row];
            let row_rect = Rect::new(0, y_offset, content_width, height.saturating_sub(GAP));

            let message = if row == 0 {
                Message::greeting(self.greeting)
            } else {
                let entry = &self.entries[row - 1];
                let pulse = if entry.transient { self.pulse_value } else { 0.0 };
                Message::from_entry(entry, &time_labels[row - 1], pulse)
            };
            let bubble = Message::bubble_rect(message.origin, row_rect);
            scroll_view.render_widget(message, bubble);

            y_offset += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the persistent state: `MessageList` itself is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

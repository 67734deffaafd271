//! # Widget State
//!
//! Core business state for the chat widget. Domain logic only, no
//! TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Widget
//! ├── is_open: bool                   // panel {hidden, shown}
//! ├── session_id: Option<String>      // session {absent, present}
//! ├── greeting: String                // initial message slot
//! ├── entries: Vec<ChatEntry>         // visible message list
//! ├── init_pending: bool              // GET /init in flight
//! ├── pending_reply: PendingReply     // scheduled or in-flight POST /process
//! ├── status_message: String          // status line text
//! └── send_delay: Duration            // pause between bubble and request
//! ```
//!
//! State changes only happen through `update(widget, action)` in action.rs.

use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::entry::{ChatEntry, EntryId, Origin};

/// Where the current reply, if any, is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingReply {
    #[default]
    None,
    /// Outgoing bubble shown, send delay still running.
    Scheduled,
    /// Request sent; the placeholder entry is on screen.
    InFlight(EntryId),
}

pub struct Widget {
    pub is_open: bool,
    pub session_id: Option<String>,
    pub greeting: String,
    pub entries: Vec<ChatEntry>,
    pub init_pending: bool,
    pub pending_reply: PendingReply,
    pub status_message: String,
    pub send_delay: Duration,
    next_entry_id: u64,
}

impl Widget {
    pub fn new(greeting: impl Into<String>, send_delay: Duration) -> Self {
        Self {
            is_open: false,
            session_id: None,
            greeting: greeting.into(),
            entries: Vec::new(),
            init_pending: false,
            pending_reply: PendingReply::None,
            status_message: String::new(),
            send_delay,
            next_entry_id: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.greeting.clone(), config.send_delay)
    }

    /// True while a submission is waiting on the delay or the service.
    pub fn is_awaiting_reply(&self) -> bool {
        self.pending_reply != PendingReply::None
    }

    pub fn push_entry(&mut self, origin: Origin, text: impl Into<String>) -> EntryId {
        let id = self.allocate_id();
        self.entries.push(ChatEntry::new(id, origin, text));
        id
    }

    pub fn push_thinking(&mut self) -> EntryId {
        let id = self.allocate_id();
        self.entries.push(ChatEntry::thinking(id));
        id
    }

    /// Remove a transient placeholder. Permanent entries are never removed.
    pub fn remove_placeholder(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.transient));
        self.entries.len() != before
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        id
    }
}

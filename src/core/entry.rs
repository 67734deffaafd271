//! # Message Entries
//!
//! One bubble in the chat list. Entries are append-only: once pushed, their
//! text never changes. The only entry that ever leaves the list is the
//! transient "Thinking..." placeholder shown while a reply is outstanding.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Text of the placeholder shown while waiting for a reply.
pub const THINKING_TEXT: &str = "Thinking...";

/// Who a bubble belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Typed by the user.
    Outgoing,
    /// From the chat service (or the widget itself).
    Incoming,
}

/// Stable handle for an entry, unique within a run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub id: EntryId,
    pub origin: Origin,
    pub text: String,
    /// Placeholder that will be removed once its reply lands.
    pub transient: bool,
    pub created_at: DateTime<Local>,
}

impl ChatEntry {
    pub fn new(id: EntryId, origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id,
            origin,
            text: text.into(),
            transient: false,
            created_at: Local::now(),
        }
    }

    pub fn thinking(id: EntryId) -> Self {
        Self {
            transient: true,
            ..Self::new(id, Origin::Incoming, THINKING_TEXT)
        }
    }

    /// Short local time label, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thinking_entry_is_transient_incoming() {
        let entry = ChatEntry::thinking(EntryId(3));
        assert_eq!(entry.origin, Origin::Incoming);
        assert_eq!(entry.text, THINKING_TEXT);
        assert!(entry.transient);
    }

    #[test]
    fn test_time_label_format() {
        let entry = ChatEntry::new(EntryId(0), Origin::Outgoing, "hi");
        let label = entry.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_origin_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Origin::Outgoing).unwrap(), "\"outgoing\"");
        assert_eq!(serde_json::to_string(&Origin::Incoming).unwrap(), "\"incoming\"");
    }
}

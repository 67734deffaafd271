//! # Actions
//!
//! Everything that can happen in the widget becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Service replies? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller must
//! perform. No side effects here. I/O happens in the TUI layer.
//!
//! ```text
//! Widget + Action  →  update()  →  Widget' + Effect
//! ```

use std::time::Duration;

use log::{error, info, warn};

use crate::core::entry::{EntryId, Origin};
use crate::core::state::{PendingReply, Widget};
use crate::service::{InitResponse, ProcessResponse, ServiceError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Launcher clicked or Ctrl+T: flip panel visibility.
    TogglePanel,
    /// Close button or Esc: hide the panel.
    ClosePanel,
    SessionReady(InitResponse),
    SessionFailed(ServiceError),
    /// User submitted the input box contents (untrimmed).
    Submit(String),
    /// Send delay elapsed for this message.
    SendDue(String),
    ReplyReceived {
        placeholder: EntryId,
        reply: ProcessResponse,
    },
    ReplyFailed {
        placeholder: EntryId,
        error: ServiceError,
    },
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Call `GET /init`.
    InitSession,
    /// Wait `delay`, then feed `Action::SendDue(message)` back in.
    ScheduleSend { message: String, delay: Duration },
    /// Call `POST /process`; answer with `ReplyReceived`/`ReplyFailed` for `placeholder`.
    SendMessage {
        session_id: Option<String>,
        message: String,
        placeholder: EntryId,
    },
    /// Call `DELETE /removesession/{session_id}` for a session nobody uses.
    RemoveSession { session_id: String },
    /// Leave the event loop, removing `session_id` on the way out if held.
    Exit { session_id: Option<String> },
}

pub fn update(widget: &mut Widget, action: Action) -> Effect {
    match action {
        Action::TogglePanel => {
            widget.is_open = !widget.is_open;
            info!("Panel {}", if widget.is_open { "opened" } else { "closed" });
            if widget.is_open && widget.session_id.is_none() && !widget.init_pending {
                widget.init_pending = true;
                widget.status_message = String::from("Connecting...");
                return Effect::InitSession;
            }
            Effect::None
        }
        Action::ClosePanel => {
            widget.is_open = false;
            Effect::None
        }
        Action::SessionReady(init) => {
            widget.init_pending = false;
            widget.greeting = init.response;
            widget.status_message.clear();

            // A reply may have issued a session while init was in flight; the
            // conversation lives there, so the init session is surplus
            if let Some(held) = &widget.session_id {
                info!("Keeping session {} and dropping init session {}", held, init.session_id);
                return Effect::RemoveSession {
                    session_id: init.session_id,
                };
            }

            info!("Session initialized: {}", init.session_id);
            widget.session_id = Some(init.session_id);
            Effect::None
        }
        Action::SessionFailed(err) => {
            error!("Error calling init API: {}", err);
            widget.init_pending = false;
            widget.status_message = format!("Offline: {err}");
            Effect::None
        }
        Action::Submit(text) => {
            let message = text.trim();
            if message.is_empty() {
                return Effect::None;
            }
            if widget.is_awaiting_reply() {
                warn!("Submit ignored: reply still pending");
                widget.status_message = String::from("Waiting for reply...");
                return Effect::None;
            }

            widget.push_entry(Origin::Outgoing, message);
            widget.pending_reply = PendingReply::Scheduled;
            Effect::ScheduleSend {
                message: message.to_string(),
                delay: widget.send_delay,
            }
        }
        Action::SendDue(message) => {
            let placeholder = widget.push_thinking();
            widget.pending_reply = PendingReply::InFlight(placeholder);
            Effect::SendMessage {
                session_id: widget.session_id.clone(),
                message,
                placeholder,
            }
        }
        Action::ReplyReceived { placeholder, reply } => {
            widget.remove_placeholder(placeholder);
            widget.push_entry(Origin::Incoming, reply.response);

            if let Some(id) = reply.session_id
                && widget.session_id.as_deref() != Some(id.as_str())
            {
                info!("Service issued session {} (was {:?})", id, widget.session_id);
                widget.session_id = Some(id);
            }

            widget.pending_reply = PendingReply::None;
            widget.status_message.clear();
            Effect::None
        }
        Action::ReplyFailed { placeholder, error } => {
            error!("Error calling process API: {}", error);
            widget.remove_placeholder(placeholder);
            widget.pending_reply = PendingReply::None;
            widget.status_message = format!("Reply failed: {error}");
            Effect::None
        }
        Action::Quit => Effect::Exit {
            session_id: widget.session_id.clone(),
        },
    }
}
